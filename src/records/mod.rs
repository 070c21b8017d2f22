//! Score and history of finished games.

mod models;
mod store;

pub use models::{HistoryEntry, Score};
pub use store::{HISTORY_KEY, HISTORY_LIMIT, RecordStore, SCORE_KEY};
