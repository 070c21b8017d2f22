//! Heuristic opponent.
//!
//! A fixed rule ladder, no search: win if possible, otherwise block, otherwise
//! take the center, a random corner, a random side, in that order.

use derive_more::{Display, Error};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::rules::LINES;
use crate::{Board, Mark, Position};

/// Errors from the move policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PolicyError {
    /// Asked to move on a full board.
    #[display("No legal move: the board is full")]
    NoLegalMove,
}

/// Which rule produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Rule {
    /// Completes a line for the mover.
    WinNow,
    /// Stops the rival completing a line.
    Block,
    /// Takes the center.
    Center,
    /// Takes a random free corner.
    Corner,
    /// Takes a random free side.
    Side,
    /// First free square.
    Fallback,
}

/// Finds the empty square of a line holding two `mark`s and one empty.
fn completing_square(board: &Board, mark: Mark) -> Option<Position> {
    LINES.iter().find_map(|line| {
        let mut empty = line.empty(board);
        match (line.count(board, mark), empty.next(), empty.next()) {
            (2, Some(pos), None) => Some(pos),
            _ => None,
        }
    })
}

/// Picks a move for `own` against `rival`, reporting which rule fired.
///
/// Randomness only decides among free corners or free sides.
///
/// # Errors
///
/// Returns [`PolicyError::NoLegalMove`] if the board is full.
#[instrument(skip(rng))]
pub fn choose_move_with_rule<R: Rng + ?Sized>(
    board: &Board,
    own: Mark,
    rival: Mark,
    rng: &mut R,
) -> Result<(Position, Rule), PolicyError> {
    if let Some(pos) = completing_square(board, own) {
        return Ok((pos, Rule::WinNow));
    }
    if let Some(pos) = completing_square(board, rival) {
        return Ok((pos, Rule::Block));
    }
    if board.is_empty(Position::Center) {
        return Ok((Position::Center, Rule::Center));
    }

    let free = |set: &[Position]| -> Vec<Position> {
        set.iter().copied().filter(|p| board.is_empty(*p)).collect()
    };
    if let Some(pos) = free(&Position::CORNERS).choose(rng) {
        return Ok((*pos, Rule::Corner));
    }
    if let Some(pos) = free(&Position::SIDES).choose(rng) {
        return Ok((*pos, Rule::Side));
    }

    board
        .empty_positions()
        .first()
        .map(|pos| (*pos, Rule::Fallback))
        .ok_or(PolicyError::NoLegalMove)
}

/// Picks a move for `own` against `rival`.
///
/// # Errors
///
/// Returns [`PolicyError::NoLegalMove`] if the board is full.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    own: Mark,
    rival: Mark,
    rng: &mut R,
) -> Result<Position, PolicyError> {
    choose_move_with_rule(board, own, rival, rng).map(|(pos, _)| pos)
}

/// Anything that can pick the computer's next move.
pub trait MovePolicy {
    /// Returns an empty position for `own` to play.
    fn choose(&mut self, board: &Board, own: Mark, rival: Mark) -> Result<Position, PolicyError>;
}

/// The heuristic opponent, owning its random source.
#[derive(Debug, Clone)]
pub struct HeuristicOpponent<R = StdRng> {
    rng: R,
}

impl HeuristicOpponent<StdRng> {
    /// Creates an opponent seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an opponent with reproducible choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for HeuristicOpponent<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MovePolicy for HeuristicOpponent<R> {
    fn choose(&mut self, board: &Board, own: Mark, rival: Mark) -> Result<Position, PolicyError> {
        let (pos, rule) = choose_move_with_rule(board, own, rival, &mut self.rng)?;
        debug!(position = %pos, %rule, mark = %own, "Heuristic opponent chose move");
        Ok(pos)
    }
}
