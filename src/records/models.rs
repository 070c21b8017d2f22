//! Persisted record types.

use chrono::{DateTime, Utc};
use couch_core::{Board, Mark};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::session::CompletedGame;
use crate::settings::Mode;

/// Running tally of finished games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct Score {
    x: u32,
    o: u32,
    draws: u32,
}

impl Score {
    /// Creates a score from raw counts.
    pub fn new(x: u32, o: u32, draws: u32) -> Self {
        Self { x, o, draws }
    }

    /// Wins credited to `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Total finished games counted.
    ///
    /// Widened to `u64` so that three near-max counters still add up.
    pub fn total(&self) -> u64 {
        u64::from(self.x) + u64::from(self.o) + u64::from(self.draws)
    }

    /// Counts one finished game.
    pub(crate) fn tally(&mut self, winner: Option<Mark>) {
        let counter = match winner {
            Some(Mark::X) => &mut self.x,
            Some(Mark::O) => &mut self.o,
            None => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
    }
}

/// One finished game in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HistoryEntry {
    id: u64,
    board: Board,
    winner: Option<Mark>,
    mode: Mode,
    human_mark: Mark,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Builds an entry for a completed game under the given id.
    pub(crate) fn from_completed(id: u64, game: &CompletedGame) -> Self {
        Self {
            id,
            board: game.board,
            winner: game.winner,
            mode: game.mode,
            human_mark: game.human_mark,
            timestamp: game.finished_at,
        }
    }

    /// One-line summary, e.g. `"X won (vs computer, you were X)"`.
    pub fn summary(&self) -> String {
        let outcome = match self.winner {
            Some(mark) => format!("{} won", mark),
            None => "Draw".to_string(),
        };
        match self.mode {
            Mode::VsOpponent => format!(
                "{} ({}, you were {})",
                outcome,
                self.mode.label(),
                self.human_mark
            ),
            Mode::VsHuman => format!("{} ({})", outcome, self.mode.label()),
        }
    }
}
