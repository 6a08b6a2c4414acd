//! Sync engine for Notemark.
//!
//! Orchestrates the composer and the Notion client: pre-flight connection
//! testing and the single-shot bookmark append. Nothing here is retried;
//! every failure is terminal for that one user action.

use chrono::Utc;
use url::Url;

use crate::services::composer::compose_entry;
use crate::services::notion_client::NotionClient;
use crate::types::bookmark::{BookmarkDraft, EntryRef};
use crate::types::credentials::{Credentials, TargetMode};
use crate::types::errors::{ConnectionError, SyncError};

/// Engine binding composition to the remote API.
pub struct SyncEngine {
    client: NotionClient,
}

impl SyncEngine {
    pub fn new(client: NotionClient) -> Self {
        Self { client }
    }

    /// Pre-flight check that the credentials can reach the target.
    /// Read-only and idempotent; delegates to the client's probe.
    pub async fn test_connection(&self, creds: &Credentials) -> Result<(), ConnectionError> {
        self.client.validate_target(creds).await
    }

    /// Appends one bookmark entry to the configured target.
    ///
    /// Validates the URL before any network traffic, composes the canonical
    /// block sequence with the current timestamp, then issues exactly one
    /// request: a children append in page mode, a row creation in database
    /// mode.
    pub async fn append_bookmark(
        &self,
        creds: &Credentials,
        draft: &BookmarkDraft,
    ) -> Result<EntryRef, SyncError> {
        validate_bookmark_url(&draft.url)?;

        let blocks = compose_entry(draft, Utc::now());
        tracing::info!(
            target_id = %creds.target_id,
            mode = ?creds.mode,
            block_count = blocks.len(),
            "appending bookmark entry"
        );

        match creds.mode {
            TargetMode::Page => {
                self.client.append_children(creds, &blocks).await?;
                Ok(EntryRef {
                    target_id: creds.target_id.clone(),
                    page_id: None,
                })
            }
            TargetMode::Database => {
                let page_id = self.client.create_row(creds, draft, &blocks).await?;
                Ok(EntryRef {
                    target_id: creds.target_id.clone(),
                    page_id,
                })
            }
        }
    }
}

/// Accepts only absolute http/https URLs. Anything else (relative paths,
/// `javascript:`, `file:`, unparseable input) is rejected before a request
/// is made.
pub fn validate_bookmark_url(url: &str) -> Result<(), SyncError> {
    let parsed = Url::parse(url).map_err(|_| SyncError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(SyncError::InvalidUrl(url.to_string())),
    }
}
