//! Key-value persistence substrate for Notemark.
//!
//! The popup core never touches storage directly; everything goes through
//! the [`KeyValueStore`] trait so the repository layer can be exercised with
//! test doubles. Two implementations ship with the crate: [`MemoryStore`]
//! (ephemeral) and [`database::SqliteStore`] (durable, on disk).

pub mod database;
pub mod migrations;

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::types::errors::StorageError;

/// Durable mapping from string key to JSON value.
///
/// Mirrors the `get`/`set`/`remove` surface of browser extension storage.
/// Implementations are the sole owners of their backing medium; the
/// repository layer is the only writer.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store used by tests and the demo binary.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.data.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let data = self
            .data
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        data.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        data.remove(key);
        Ok(())
    }
}
