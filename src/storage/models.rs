//! Database rows for the key-value table.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use super::schema;

/// A stored record.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::kv_records)]
pub struct KvRecord {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}

/// Insertable row; replaces any existing row with the same key.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::kv_records)]
pub struct NewKvRecord {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}
