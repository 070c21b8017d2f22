//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the eight winning triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line([Position; 3]);

impl Line {
    /// The three positions of this line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The three board indices of this line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// Whether the line passes through `pos`.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// Number of squares on this line holding `mark`.
    pub fn count(&self, board: &Board, mark: Mark) -> usize {
        self.0
            .iter()
            .filter(|p| board.get(**p) == Square::Occupied(mark))
            .count()
    }

    /// Empty positions on this line.
    pub fn empty<'a>(&'a self, board: &'a Board) -> impl Iterator<Item = Position> + 'a {
        self.0.iter().copied().filter(move |p| board.is_empty(*p))
    }
}

/// Winning lines: rows top to bottom, columns left to right, then diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    Line([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    Line([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    Line([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    Line([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    Line([Position::TopCenter, Position::Center, Position::BottomCenter]),
    Line([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    Line([Position::TopLeft, Position::Center, Position::BottomRight]),
    Line([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Checks if there is a winner on the board.
///
/// Returns the mark and the first completed line in [`LINES`] order.
#[instrument]
pub fn check_winner(board: &Board) -> Option<(Mark, Line)> {
    LINES.into_iter().find_map(|line| {
        let [a, b, c] = line.positions();
        let first = board.get(a);
        match first {
            Square::Occupied(mark) if board.get(b) == first && board.get(c) == first => {
                Some((mark, line))
            }
            _ => None,
        }
    })
}
