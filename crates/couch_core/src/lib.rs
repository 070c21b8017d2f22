//! Pure tic-tac-toe logic for couch_tictactoe.
//!
//! - **Types**: [`Mark`], [`Square`], [`Board`], [`Position`]
//! - **Rules**: [`evaluate`] turns a board into a [`GameResult`]
//! - **Policy**: [`HeuristicOpponent`] picks the computer's move
//!
//! Nothing here performs I/O; the session and persistence live in the
//! application crate.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod policy;
mod position;
pub mod rules;
mod types;

pub use policy::{
    HeuristicOpponent, MovePolicy, PolicyError, Rule, choose_move, choose_move_with_rule,
};
pub use position::Position;
pub use rules::{GameResult, LINES, Line, check_winner, evaluate, is_full};
pub use types::{Board, Mark, Square};
