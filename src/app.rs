//! App Core for Notemark.
//!
//! Central struct wiring the settings repository, sync engine and tab probe
//! together, and implementing the two popup flows: confirming credentials
//! and capturing the current tab as a bookmark.

use std::sync::Arc;

use crate::services::notion_client::NotionClient;
use crate::services::settings_repository::{SettingsRepository, SettingsRepositoryTrait};
use crate::services::sync_engine::SyncEngine;
use crate::services::tab_probe::{StaticTabProbe, TabProbe};
use crate::storage::database::SqliteStore;
use crate::storage::KeyValueStore;
use crate::types::bookmark::{BookmarkDraft, EntryRef, TabInfo};
use crate::types::credentials::Credentials;
use crate::types::errors::{CaptureError, SetupError, StorageError};

/// Whether the installation currently has confirmed credentials.
///
/// Derived from storage on every query; the session oscillates between the
/// two states with no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unconfigured,
    Configured,
}

/// Central application struct holding the popup core's collaborators.
pub struct App {
    pub settings: SettingsRepository,
    pub sync: SyncEngine,
    pub tabs: Arc<StaticTabProbe>,
}

impl App {
    /// Creates an App backed by the SQLite store at the given path.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let store = Arc::new(SqliteStore::open(db_path)?);
        Ok(Self::with_store(store))
    }

    /// Creates an App over an arbitrary store. Tests and the demo binary
    /// pass a [`crate::storage::MemoryStore`].
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            settings: SettingsRepository::new(store),
            sync: SyncEngine::new(NotionClient::new()),
            tabs: Arc::new(StaticTabProbe::new()),
        }
    }

    /// App with an explicit sync engine, used by tests to point the client
    /// at a local stub server.
    pub fn with_parts(store: Arc<dyn KeyValueStore>, sync: SyncEngine) -> Self {
        Self {
            settings: SettingsRepository::new(store),
            sync,
            tabs: Arc::new(StaticTabProbe::new()),
        }
    }

    pub fn session_state(&self) -> SessionState {
        match self.settings.get_credentials() {
            Some(_) => SessionState::Configured,
            None => SessionState::Unconfigured,
        }
    }

    /// The confirm-credentials flow: pre-flight connection test, then
    /// promotion to permanent settings, then draft cleanup.
    ///
    /// Ordering is strict: the save must complete before the draft is
    /// cleared, and a failed save leaves the draft intact so the user's
    /// input survives for the next attempt. A failed `clear_draft` after a
    /// successful save is surfaced too, since a stale draft could resurrect
    /// outdated input on the next open.
    pub async fn confirm_credentials(&self, creds: &Credentials) -> Result<(), SetupError> {
        if !creds.is_complete() {
            return Err(SetupError::Incomplete);
        }
        self.sync.test_connection(creds).await?;
        self.settings.save_credentials(creds)?;
        self.settings.clear_draft()?;
        tracing::info!(target_id = %creds.target_id, "credentials confirmed");
        Ok(())
    }

    /// The capture flow: resolve the active tab, build the draft, append.
    ///
    /// `url`/`title` override the tab probe when supplied (the popup lets
    /// the user edit the title before saving); `notes` is free text. The
    /// session state is unchanged by success or failure.
    pub async fn capture_bookmark(
        &self,
        url: Option<String>,
        title: Option<String>,
        notes: Option<String>,
    ) -> Result<EntryRef, CaptureError> {
        let creds = self
            .settings
            .get_credentials()
            .ok_or(CaptureError::NotConfigured)?;

        let (url, title) = match url {
            Some(url) => (url, title),
            None => {
                let TabInfo { url, title: tab_title } = self.tabs.current_tab()?;
                (url, title.or(tab_title))
            }
        };

        let mut draft = BookmarkDraft::new(url);
        draft.title = title;
        draft.notes = notes;

        let entry = self.sync.append_bookmark(&creds, &draft).await?;
        Ok(entry)
    }

    /// Session teardown: pushes any scheduled draft writes to storage so a
    /// paste followed by an immediate close is never lost.
    pub fn shutdown(&self) -> Result<(), StorageError> {
        self.settings.flush_draft_writes()
    }
}
