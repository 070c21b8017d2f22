//! SQLite-backed storage.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use super::models::{KvRecord, NewKvRecord};
use super::{Storage, StorageError, StorageErrorKind, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Storage in a local SQLite database file.
///
/// Each operation opens its own connection, so handles are cheap to clone.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db_path: String,
}

impl SqliteStorage {
    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StorageError> {
        let storage = Self {
            db_path: db_path.as_ref().to_string(),
        };
        let mut conn = storage.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StorageError::new(StorageErrorKind::Migration, e.to_string()))?;
        info!(path = %storage.db_path, migrations = applied.len(), "Storage opened");
        Ok(storage)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StorageError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path).map_err(|e| {
            StorageError::new(StorageErrorKind::Connection, format!("'{}': {}", self.db_path, e))
        })
    }

    /// Lists every stored record, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn records(&self) -> Result<Vec<KvRecord>, StorageError> {
        let mut conn = self.connection()?;
        let records = schema::kv_records::table
            .order(schema::kv_records::key.asc())
            .select(KvRecord::as_select())
            .load(&mut conn)?;
        debug!(count = records.len(), "Records loaded");
        Ok(records)
    }
}

impl Storage for SqliteStorage {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.connection()?;
        let record = schema::kv_records::table
            .find(key)
            .select(KvRecord::as_select())
            .first(&mut conn)
            .optional()?;

        match record {
            Some(record) => {
                debug!(updated_at = %record.updated_at(), "Record found");
                Ok(Some(record.value().clone()))
            }
            None => {
                debug!("Record not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let row = NewKvRecord::new(
            key.to_string(),
            value.to_string(),
            chrono::Utc::now().naive_utc(),
        );
        diesel::replace_into(schema::kv_records::table)
            .values(&row)
            .execute(&mut conn)?;
        debug!("Record stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::kv_records::table.find(key)).execute(&mut conn)?;
        debug!(removed, "Record removed");
        Ok(())
    }
}
