//! Game session state machine.
//!
//! A session holds one board at a time. Moves are validated here; anything
//! illegal is rejected without touching state. The transition that ends a
//! game returns a [`CompletedGame`], and only that transition does, so each
//! finished game is reported exactly once.

use chrono::{DateTime, Utc};
use couch_core::{Board, GameResult, Mark, Position, Square, evaluate};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::settings::{Mode, Settings};

/// Why a move was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveError {
    /// The index does not name a square.
    #[display("Index {} is not on the board", _0)]
    OutOfBounds(usize),

    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this mover's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Mark),
}

impl std::error::Error for MoveError {}

/// Facts about a finished game, handed to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGame {
    /// Final board.
    pub board: Board,
    /// Winning mark, `None` for a draw.
    pub winner: Option<Mark>,
    /// Mode the game was played in.
    pub mode: Mode,
    /// Mark the local player held.
    pub human_mark: Mark,
    /// When the final move landed.
    pub finished_at: DateTime<Utc>,
}

/// An accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Where the mark went.
    pub position: Position,
    /// The mark placed.
    pub mark: Mark,
    /// Result after the move.
    pub result: GameResult,
    /// Present only when this move ended the game.
    pub completed: Option<CompletedGame>,
}

/// One game of tic-tac-toe plus the mode and mark assignment it runs under.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    turn: Mark,
    mode: Mode,
    human_mark: Mark,
    result: GameResult,
}

impl GameSession {
    /// Creates a fresh session. X always moves first.
    #[instrument]
    pub fn new(settings: Settings) -> Self {
        info!(mode = %settings.mode, human_mark = %settings.human_mark, "Creating game session");
        Self {
            board: Board::new(),
            turn: Mark::X,
            mode: settings.mode,
            human_mark: settings.human_mark,
            result: GameResult::Ongoing,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark whose turn it is.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns the play mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the local player's mark.
    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    /// Returns the computer's mark.
    pub fn opponent_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    /// Returns the current result.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Returns the current mode and mark as settings.
    pub fn settings(&self) -> Settings {
        Settings::new(self.mode, self.human_mark)
    }

    /// Clears the board for a new game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Mark::X;
        self.result = GameResult::Ongoing;
        debug!("Session reset");
    }

    /// Switches mode and starts a new game.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Reassigns the local player's mark and starts a new game.
    #[instrument(skip(self))]
    pub fn set_human_mark(&mut self, mark: Mark) {
        self.human_mark = mark;
        self.reset();
    }

    /// Whether the computer owes a move right now.
    pub fn opponent_to_move(&self) -> bool {
        self.mode == Mode::VsOpponent
            && self.result == GameResult::Ongoing
            && self.turn == self.opponent_mark()
    }

    /// Applies a move from the local player(s).
    ///
    /// Against the computer, only the human's turn is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] and leaves the session untouched when the index
    /// is off the board, the square is taken, the game is over, or it is the
    /// computer's turn.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn apply_move(&mut self, index: usize) -> Result<Placement, MoveError> {
        let position = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        if self.mode == Mode::VsOpponent && self.turn != self.human_mark {
            return Err(MoveError::WrongPlayer(self.human_mark));
        }
        self.place(position)
    }

    /// Applies the computer's move, bypassing the human-turn check.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::WrongPlayer`] if the computer is not due to move,
    /// plus the usual square and game-over checks.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn apply_opponent_move(&mut self, position: Position) -> Result<Placement, MoveError> {
        if self.mode != Mode::VsOpponent || self.turn != self.opponent_mark() {
            return Err(MoveError::WrongPlayer(self.opponent_mark()));
        }
        self.place(position)
    }

    fn place(&mut self, position: Position) -> Result<Placement, MoveError> {
        if self.result.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_empty(position) {
            return Err(MoveError::SquareOccupied(position));
        }

        let mark = self.turn;
        self.board.set(position, Square::Occupied(mark));
        self.turn = mark.opponent();
        self.result = evaluate(&self.board);

        // Reaching here means the game was ongoing, so a terminal result now is
        // the one Ongoing -> Won/Draw edge for this game.
        let completed = self.result.is_terminal().then(|| CompletedGame {
            board: self.board,
            winner: self.result.winner(),
            mode: self.mode,
            human_mark: self.human_mark,
            finished_at: Utc::now(),
        });

        match &completed {
            Some(game) => info!(%position, %mark, winner = ?game.winner, "Game finished"),
            None => debug!(%position, %mark, "Move applied"),
        }

        Ok(Placement {
            position,
            mark,
            result: self.result,
            completed,
        })
    }

    /// Status line for display.
    pub fn status_text(&self) -> String {
        status_text(self.result, self.turn)
    }
}

/// Status line for a result and turn: `"X to move"`, `"O wins!"`,
/// `"It's a draw"`.
pub fn status_text(result: GameResult, turn: Mark) -> String {
    match result {
        GameResult::Ongoing => format!("{} to move", turn),
        GameResult::Won { mark, .. } => format!("{} wins!", mark),
        GameResult::Draw => "It's a draw".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player() -> GameSession {
        GameSession::new(Settings::new(Mode::VsHuman, Mark::X))
    }

    #[test]
    fn test_new_session_x_to_move() {
        let session = GameSession::new(Settings::new(Mode::VsOpponent, Mark::O));
        assert_eq!(session.turn(), Mark::X);
        assert_eq!(session.result(), GameResult::Ongoing);
        assert_eq!(session.board(), &Board::new());
        assert!(session.opponent_to_move());
    }

    #[test]
    fn test_turns_alternate() {
        let mut session = two_player();
        let mut expected = Mark::X;
        for index in [4, 0, 8, 2] {
            let placed = session.apply_move(index).unwrap();
            assert_eq!(placed.mark, expected);
            expected = expected.opponent();
            assert_eq!(session.turn(), expected);
        }
    }

    #[test]
    fn test_occupied_square_is_rejected_without_change() {
        let mut session = two_player();
        session.apply_move(4).unwrap();
        let before = (*session.board(), session.turn(), session.result());

        assert_eq!(
            session.apply_move(4),
            Err(MoveError::SquareOccupied(Position::Center))
        );
        assert_eq!((*session.board(), session.turn(), session.result()), before);
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut session = two_player();
        assert_eq!(session.apply_move(9), Err(MoveError::OutOfBounds(9)));
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[test]
    fn test_moves_after_game_over_are_rejected() {
        let mut session = two_player();
        // X: 0 1 2, O: 3 4
        for index in [0, 3, 1, 4] {
            assert!(session.apply_move(index).unwrap().completed.is_none());
        }
        let finishing = session.apply_move(2).unwrap();
        let completed = finishing.completed.expect("win reported");
        assert_eq!(completed.winner, Some(Mark::X));
        assert_eq!(session.status_text(), "X wins!");

        let before = (*session.board(), session.turn(), session.result());
        assert_eq!(session.apply_move(5), Err(MoveError::GameOver));
        assert_eq!((*session.board(), session.turn(), session.result()), before);
    }

    #[test]
    fn test_draw_reports_once_with_no_winner() {
        let mut session = two_player();
        // X O X / X O O / O X X
        let moves = [0, 1, 2, 4, 3, 5, 7, 6, 8];
        let mut completions = 0;
        for index in moves {
            if session.apply_move(index).unwrap().completed.is_some() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(session.result(), GameResult::Draw);
        assert_eq!(session.status_text(), "It's a draw");
    }

    #[test]
    fn test_human_cannot_move_on_opponent_turn() {
        let mut session = GameSession::new(Settings::new(Mode::VsOpponent, Mark::O));
        assert_eq!(session.apply_move(0), Err(MoveError::WrongPlayer(Mark::O)));
        assert_eq!(session.board().occupied_count(), 0);

        session.apply_opponent_move(Position::Center).unwrap();
        assert_eq!(session.turn(), Mark::O);
        assert!(!session.opponent_to_move());
        assert!(session.apply_move(0).is_ok());
    }

    #[test]
    fn test_opponent_move_refused_on_human_turn() {
        let mut session = GameSession::new(Settings::default());
        assert_eq!(
            session.apply_opponent_move(Position::Center),
            Err(MoveError::WrongPlayer(Mark::O))
        );
    }

    #[test]
    fn test_mode_and_mark_changes_reset_board() {
        let mut session = two_player();
        session.apply_move(0).unwrap();
        session.set_mode(Mode::VsOpponent);
        assert_eq!(session.board().occupied_count(), 0);
        assert_eq!(session.turn(), Mark::X);

        session.apply_move(0).unwrap();
        session.set_human_mark(Mark::O);
        assert_eq!(session.board().occupied_count(), 0);
        assert_eq!(session.turn(), Mark::X);
        assert_eq!(session.opponent_mark(), Mark::X);
    }

    #[test]
    fn test_status_text_while_ongoing() {
        let mut session = two_player();
        assert_eq!(session.status_text(), "X to move");
        session.apply_move(0).unwrap();
        assert_eq!(session.status_text(), "O to move");
    }
}
