//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are separated from board
//! storage so the session and the opponent policy share one evaluator.

pub mod draw;
pub mod outcome;
pub mod win;

pub use draw::is_full;
pub use outcome::{GameResult, evaluate};
pub use win::{LINES, Line, check_winner};
