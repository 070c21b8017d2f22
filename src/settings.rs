//! Player settings (mode and mark), remembered between runs.

use couch_core::Mark;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::storage::{Storage, StorageError};

/// Storage key for the settings record.
pub const SETTINGS_KEY: &str = "couch_tictactoe.settings";

/// Who the local player faces.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Mode {
    /// Play against the heuristic opponent.
    #[default]
    VsOpponent,
    /// Two people share the board.
    VsHuman,
}

impl Mode {
    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::VsOpponent => "vs computer",
            Self::VsHuman => "two players",
        }
    }

    /// Toggles between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            Self::VsOpponent => Self::VsHuman,
            Self::VsHuman => Self::VsOpponent,
        }
    }
}

/// Last-used mode and mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Play mode.
    pub mode: Mode,
    /// Mark the local player uses against the opponent.
    pub human_mark: Mark,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::VsOpponent,
            human_mark: Mark::X,
        }
    }
}

impl Settings {
    /// Creates settings with the given mode and mark.
    pub fn new(mode: Mode, human_mark: Mark) -> Self {
        Self { mode, human_mark }
    }

    /// Loads saved settings, falling back to defaults when the record is
    /// missing or unreadable.
    #[instrument(skip(storage))]
    pub fn load<S: Storage>(storage: &S) -> Self {
        let raw = match storage.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved settings, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(error = %e, "Could not read settings, using defaults");
                return Self::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Corrupt settings record, using defaults");
            Self::default()
        })
    }

    /// Saves these settings.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record cannot be written.
    #[instrument(skip(storage))]
    pub fn save<S: Storage>(&self, storage: &S) -> Result<(), StorageError> {
        let raw = serde_json::to_string(self).map_err(|e| StorageError::encode(SETTINGS_KEY, e))?;
        storage.set(SETTINGS_KEY, &raw)
    }
}
