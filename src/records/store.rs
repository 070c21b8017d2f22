//! Score and history store.

use std::collections::VecDeque;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::{HistoryEntry, Score};
use crate::session::CompletedGame;
use crate::storage::{Storage, StorageError};

/// Storage key for the score record.
pub const SCORE_KEY: &str = "couch_tictactoe.score";

/// Storage key for the history record.
pub const HISTORY_KEY: &str = "couch_tictactoe.history";

/// Most history entries kept.
pub const HISTORY_LIMIT: usize = 50;

/// Durable score counters and a bounded newest-first history.
///
/// Loads from storage when created and writes back after every change.
/// Unreadable records count as absent; failed writes are logged and play
/// continues with the in-memory state.
#[derive(Debug, Clone)]
pub struct RecordStore<S: Storage> {
    storage: S,
    score: Score,
    history: VecDeque<HistoryEntry>,
    last_id: u64,
}

impl<S: Storage> RecordStore<S> {
    /// Creates a store, loading existing records from `storage`.
    #[instrument(skip(storage))]
    pub fn load(storage: S) -> Self {
        let score: Score = read_record(&storage, SCORE_KEY).unwrap_or_default();
        let mut history: VecDeque<HistoryEntry> =
            read_record(&storage, HISTORY_KEY).unwrap_or_default();
        history.truncate(HISTORY_LIMIT);
        let last_id = history.iter().map(|e| *e.id()).max().unwrap_or(0);

        info!(
            x = score.x(),
            o = score.o(),
            draws = score.draws(),
            history = history.len(),
            "Records loaded"
        );

        Self {
            storage,
            score,
            history,
            last_id,
        }
    }

    /// Current score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// History, newest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> + '_ {
        self.history.iter()
    }

    /// Most recent entry, if any.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.history.front()
    }

    /// Counts a finished game and logs it at the head of the history.
    #[instrument(skip(self, game), fields(winner = ?game.winner))]
    pub fn record_completed_game(&mut self, game: &CompletedGame) -> &HistoryEntry {
        self.score.tally(game.winner);

        let id = self.next_id(game);
        self.history.push_front(HistoryEntry::from_completed(id, game));
        self.history.truncate(HISTORY_LIMIT);

        info!(id, total = self.score.total(), "Game recorded");
        self.save();

        &self.history[0]
    }

    /// Zeroes the score, empties the history and removes stored records.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.score = Score::default();
        self.history.clear();

        for key in [SCORE_KEY, HISTORY_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Could not remove record");
            }
        }
        info!("Records cleared");
    }

    /// Writes score and history to storage.
    #[instrument(skip(self))]
    pub fn save(&self) {
        if let Err(e) = write_record(&self.storage, SCORE_KEY, &self.score) {
            warn!(error = %e, "Could not save score");
        }
        if let Err(e) = write_record(&self.storage, HISTORY_KEY, &self.history) {
            warn!(error = %e, "Could not save history");
        }
    }

    /// Unique, strictly increasing id based on the finish time in
    /// milliseconds.
    fn next_id(&mut self, game: &CompletedGame) -> u64 {
        let millis = u64::try_from(game.finished_at.timestamp_millis()).unwrap_or(0);
        self.last_id = millis.max(self.last_id + 1);
        self.last_id
    }
}

/// Reads and decodes a record; `None` if absent, unreadable or corrupt.
fn read_record<S: Storage, T: DeserializeOwned>(storage: &S, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored record");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "Could not read record");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Corrupt record, ignoring");
            None
        }
    }
}

fn write_record<S: Storage, T: Serialize>(
    storage: &S,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::encode(key, e))?;
    storage.set(key, &raw)
}
