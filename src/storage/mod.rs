//! Local key-value storage for persisted records.
//!
//! Values are JSON strings keyed by record name. [`SqliteStorage`] keeps them
//! in a single-table SQLite database; [`MemoryStorage`] keeps them in process.

mod error;
mod memory;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::{StorageError, StorageErrorKind};
pub use memory::MemoryStorage;
pub use models::KvRecord;
pub use sqlite::SqliteStorage;

/// A string key-value store.
///
/// Implementations are cheap handles: cloning one yields another handle to
/// the same underlying data.
pub trait Storage: Clone + std::fmt::Debug {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
