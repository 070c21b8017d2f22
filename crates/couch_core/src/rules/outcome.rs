//! Board evaluation: ongoing, won or drawn.

use super::{Line, check_winner, is_full};
use crate::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board.
///
/// Derived from the board alone; never tracked separately from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Moves remain and nobody has a line.
    Ongoing,
    /// A mark completed a line.
    Won {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        line: Line,
    },
    /// Board is full with no line.
    Draw,
}

impl GameResult {
    /// Returns true once the game is won or drawn.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::Ongoing)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameResult::Won { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn winning_line(&self) -> Option<Line> {
        match self {
            GameResult::Won { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Evaluates a board.
///
/// A completed line wins over a full board, so a last move that both fills
/// the board and completes a line is a win.
#[instrument]
pub fn evaluate(board: &Board) -> GameResult {
    if let Some((mark, line)) = check_winner(board) {
        return GameResult::Won { mark, line };
    }
    if is_full(board) {
        return GameResult::Draw;
    }
    GameResult::Ongoing
}
