//! Storage error types.

use derive_more::{Display, Error};

/// Which part of a storage operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum StorageErrorKind {
    /// The database could not be opened.
    Connection,
    /// Schema migrations did not apply.
    Migration,
    /// A read or write statement failed.
    Query,
    /// A record could not be turned into JSON.
    Encode,
    /// The in-memory map was left poisoned by a panicking writer.
    Poisoned,
}

/// A failed storage operation, tagged with where it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("{} failure: {} ({}:{})", kind, message, file, line)]
pub struct StorageError {
    /// What went wrong.
    pub kind: StorageErrorKind,
    /// Backend detail.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl StorageError {
    /// Creates an error of `kind` located at the caller.
    #[track_caller]
    pub fn new(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// A record under `key` that serde_json refused to encode.
    #[track_caller]
    pub fn encode(key: &str, err: serde_json::Error) -> Self {
        Self::new(StorageErrorKind::Encode, format!("record '{}': {}", key, err))
    }
}

impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        let message = match &err {
            diesel::result::Error::DatabaseError(kind, info) => {
                format!("sqlite rejected statement ({:?}): {}", kind, info.message())
            }
            other => other.to_string(),
        };
        Self::new(StorageErrorKind::Query, message)
    }
}

impl From<diesel::ConnectionError> for StorageError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(StorageErrorKind::Connection, err.to_string())
    }
}
