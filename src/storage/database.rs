//! SQLite-backed key-value store for Notemark.
//!
//! Wraps a `rusqlite::Connection` behind the [`KeyValueStore`] trait and
//! automatically runs schema migrations on open. This is the durable
//! substrate the repository layer persists settings and drafts into.

use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::{migrations, KeyValueStore};
use crate::types::errors::StorageError;

/// Durable key-value store backed by a single SQLite table.
///
/// The connection sits behind a mutex so the store can be shared as
/// `Arc<dyn KeyValueStore>` with the scheduled draft-write tasks.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the store at the given file path and runs migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn =
            Connection::open(path).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        migrations::run_all(&conn).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory store. Useful for tests — contents are discarded
    /// when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        migrations::run_all(&conn).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        match raw {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let text =
            serde_json::to_string(&value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, text, Self::now()],
        )
        .map_err(|e| StorageError::WriteRejected(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| StorageError::WriteRejected(e.to_string()))?;
        Ok(())
    }
}
