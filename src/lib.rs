//! Couch Tic-Tac-Toe - a local tic-tac-toe game with a persistent scoreboard
//!
//! Rules and the computer opponent live in `couch_core`; this crate adds the
//! game session, score and history records, and the storage they persist to.
//!
//! # Architecture
//!
//! - **Session**: one board, turn order and result, with move validation
//! - **Controller**: routes input, schedules the computer's replies, records finished games
//! - **Records**: score counters and a bounded newest-first history
//! - **Storage**: key-value backends (SQLite or in-memory)
//!
//! # Example
//!
//! ```
//! use couch_tictactoe::{GameController, MemoryStorage, Settings};
//! use couch_core::HeuristicOpponent;
//!
//! let mut controller = GameController::with_settings(
//!     MemoryStorage::new(),
//!     HeuristicOpponent::with_seed(7),
//!     Settings::default(),
//! );
//! assert!(controller.apply_move(4));
//! assert!(controller.run_pending_opponent_move());
//! assert_eq!(controller.status_text(), "X to move");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod records;
pub mod render;
mod session;
mod settings;
mod storage;

#[doc(hidden)]
pub mod cli;
#[doc(hidden)]
pub mod play;

pub use config::{AppConfig, ConfigError};
pub use controller::{GameController, OpponentTicket};
pub use records::{HISTORY_KEY, HISTORY_LIMIT, HistoryEntry, RecordStore, SCORE_KEY, Score};
pub use session::{CompletedGame, GameSession, MoveError, Placement, status_text};
pub use settings::{Mode, SETTINGS_KEY, Settings};
pub use storage::{KvRecord, MemoryStorage, SqliteStorage, Storage, StorageError, StorageErrorKind};
