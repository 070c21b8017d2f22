//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Mark placed by a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (always opens the game).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
///
/// Serialized as `null` when empty and as the mark otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Mark>", into = "Option<Mark>")]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark on this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Option<Mark>> for Square {
    fn from(mark: Option<Mark>) -> Self {
        mark.map_or(Square::Empty, Square::Occupied)
    }
}

impl From<Square> for Option<Mark> {
    fn from(square: Square) -> Self {
        square.mark()
    }
}

/// 3x3 tic-tac-toe board.
///
/// Always exactly nine squares in row-major order. Deserializing anything
/// other than a nine-element array fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from nine squares.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns empty positions in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }

    #[test]
    fn test_mark_parses_case_insensitive() {
        assert_eq!("x".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!("O".parse::<Mark>().unwrap(), Mark::O);
        assert!("z".parse::<Mark>().is_err());
    }

    #[test]
    fn test_board_serializes_as_mark_array() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        board.set(Position::Center, Square::Occupied(Mark::O));

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["X",null,null,null,"O",null,null,null,null]"#);

        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_board_rejects_wrong_length() {
        let result = serde_json::from_str::<Board>(r#"["X",null,"O"]"#);
        assert!(result.is_err());
    }
}
