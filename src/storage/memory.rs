//! In-process storage.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, instrument};

use super::{Storage, StorageError, StorageErrorKind};

/// Storage backed by a shared in-memory map.
///
/// Clones share the same map, which lets tests inspect what a store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::new(StorageErrorKind::Poisoned, "memory storage lock"))
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or_default()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        debug!("Value stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
