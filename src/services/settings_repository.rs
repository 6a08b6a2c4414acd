//! Settings & draft persistence for Notemark.
//!
//! Stores confirmed [`Credentials`] under one key and in-progress
//! [`DraftCredentials`] under another, so half-typed input survives the
//! popup being closed and reopened. Draft writes are scheduled per field:
//! keystrokes are debounced, pastes are written after a short settle delay.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::storage::KeyValueStore;
use crate::types::credentials::{Credentials, DraftCredentials, DraftField};
use crate::types::errors::StorageError;

/// Storage key for confirmed credentials.
pub const SETTINGS_KEY: &str = "notemark_settings";
/// Storage key for the unconfirmed draft.
pub const DRAFT_KEY: &str = "notemark_settings_draft";

/// Delay between the last keystroke in a field and the draft write.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);
/// Settle delay for paste events, long enough for the input's committed
/// value to be observed but short enough that an immediate popup close
/// cannot outrun it together with a flush.
pub const PASTE_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// How a draft edit reached the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Normal keystroke: coalesce bursts, write after the debounce window.
    Debounced,
    /// Paste: bypass the debounce window, write after the settle delay.
    Immediate,
}

/// Trait defining the settings repository interface.
pub trait SettingsRepositoryTrait {
    /// Reads confirmed credentials. Storage failures degrade to `None`
    /// (logged), so callers always get a usable value.
    fn get_credentials(&self) -> Option<Credentials>;
    fn save_credentials(&self, creds: &Credentials) -> Result<(), StorageError>;
    fn clear_credentials(&self) -> Result<(), StorageError>;
    /// Reads the stored draft, `{}` when absent or unreadable.
    fn get_draft(&self) -> DraftCredentials;
    /// Schedules one field of the draft for persistence. Requires a tokio
    /// runtime; a later edit to the same field supersedes the pending write.
    fn update_draft_field(&self, field: DraftField, value: &str, policy: WritePolicy);
    fn clear_draft(&self) -> Result<(), StorageError>;
    /// Forces every pending scheduled draft write to storage now.
    /// Called on session termination so no scheduled edit is lost.
    fn flush_draft_writes(&self) -> Result<(), StorageError>;
}

/// A draft edit waiting for its timer to fire.
struct PendingWrite {
    value: String,
    generation: u64,
    task: JoinHandle<()>,
}

/// Settings repository over an injected [`KeyValueStore`].
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
    debounce: Duration,
    paste_settle: Duration,
    /// Pending writes keyed per field. The map mutex also serializes the
    /// read-merge-write of the draft key, keeping the store single-writer.
    pending: Arc<Mutex<HashMap<DraftField, PendingWrite>>>,
    generation: AtomicU64,
}

impl SettingsRepository {
    /// Creates a repository with the production delays (500 ms debounce,
    /// 100 ms paste settle).
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_delays(store, DEBOUNCE_DELAY, PASTE_SETTLE_DELAY)
    }

    /// Creates a repository with custom delays. Tests use short delays so
    /// coalescing behavior can be observed without half-second sleeps.
    pub fn with_delays(
        store: Arc<dyn KeyValueStore>,
        debounce: Duration,
        paste_settle: Duration,
    ) -> Self {
        Self {
            store,
            debounce,
            paste_settle,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Number of draft writes currently scheduled but not yet performed.
    pub fn pending_draft_writes(&self) -> usize {
        lock_pending(&self.pending).len()
    }

    fn load_draft(store: &dyn KeyValueStore) -> DraftCredentials {
        match store.get(DRAFT_KEY) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("stored draft is malformed, treating as empty: {}", e);
                DraftCredentials::default()
            }),
            Ok(None) => DraftCredentials::default(),
            Err(e) => {
                tracing::warn!("draft read failed, treating as empty: {}", e);
                DraftCredentials::default()
            }
        }
    }

    /// Read-merge-write of one draft field. Callers must hold the pending
    /// lock so merges never interleave.
    fn merge_draft_field(
        store: &dyn KeyValueStore,
        field: DraftField,
        value: &str,
    ) -> Result<(), StorageError> {
        let mut draft = Self::load_draft(store);
        draft.set_field(field, value);
        let json =
            serde_json::to_value(&draft).map_err(|e| StorageError::Serialization(e.to_string()))?;
        store.set(DRAFT_KEY, json)
    }
}

/// Locks the pending map, recovering from a poisoned mutex so a panicked
/// writer task does not wedge later draft edits.
fn lock_pending(
    pending: &Mutex<HashMap<DraftField, PendingWrite>>,
) -> MutexGuard<'_, HashMap<DraftField, PendingWrite>> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SettingsRepositoryTrait for SettingsRepository {
    fn get_credentials(&self) -> Option<Credentials> {
        match self.store.get(SETTINGS_KEY) {
            Ok(Some(value)) => match serde_json::from_value::<Credentials>(value) {
                Ok(creds) if creds.is_complete() => Some(creds),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("stored credentials are malformed, treating as absent: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("credentials read failed, treating as absent: {}", e);
                None
            }
        }
    }

    fn save_credentials(&self, creds: &Credentials) -> Result<(), StorageError> {
        let json =
            serde_json::to_value(creds).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(SETTINGS_KEY, json)
    }

    fn clear_credentials(&self) -> Result<(), StorageError> {
        self.store.remove(SETTINGS_KEY)
    }

    fn get_draft(&self) -> DraftCredentials {
        // A value whose timer has not fired yet is still part of the draft
        // from the caller's point of view.
        let mut draft = Self::load_draft(self.store.as_ref());
        let pending = lock_pending(&self.pending);
        for (field, write) in pending.iter() {
            draft.set_field(*field, write.value.clone());
        }
        draft
    }

    fn update_draft_field(&self, field: DraftField, value: &str, policy: WritePolicy) {
        let delay = match policy {
            WritePolicy::Debounced => self.debounce,
            WritePolicy::Immediate => self.paste_settle,
        };
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;

        // Holding the lock across the spawn means the task cannot observe
        // the map before this entry is inserted, whatever the delay.
        let mut pending = lock_pending(&self.pending);
        if let Some(previous) = pending.remove(&field) {
            previous.task.abort();
        }

        let store = Arc::clone(&self.store);
        let map = Arc::clone(&self.pending);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut pending = lock_pending(&map);
            // Only the newest edit for this field may write; a superseded
            // timer that outran its abort must stay silent.
            let entry = match pending.remove(&field) {
                Some(entry) if entry.generation == generation => entry,
                Some(newer) => {
                    pending.insert(field, newer);
                    return;
                }
                None => return,
            };
            if let Err(e) = SettingsRepository::merge_draft_field(store.as_ref(), field, &entry.value)
            {
                tracing::warn!("scheduled draft write for {} failed: {}", field.as_str(), e);
            }
        });

        pending.insert(
            field,
            PendingWrite {
                value: value.to_string(),
                generation,
                task,
            },
        );
    }

    fn clear_draft(&self) -> Result<(), StorageError> {
        // Cancel outstanding timers first so a stale write cannot resurrect
        // the draft after it was cleared.
        let mut pending = lock_pending(&self.pending);
        for (_, write) in pending.drain() {
            write.task.abort();
        }
        self.store.remove(DRAFT_KEY)
    }

    fn flush_draft_writes(&self) -> Result<(), StorageError> {
        let mut pending = lock_pending(&self.pending);
        let mut first_err = None;
        for (field, write) in pending.drain() {
            write.task.abort();
            if let Err(e) = Self::merge_draft_field(self.store.as_ref(), field, &write.value) {
                tracing::warn!("draft flush for {} failed: {}", field.as_str(), e);
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
