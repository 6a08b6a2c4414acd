//! Notion API client for Notemark.
//!
//! Thin reqwest wrapper over the three endpoints the popup core needs:
//! read-only target validation, block-children append (page mode) and row
//! creation (database mode). Every request pins the protocol version via
//! the `Notion-Version` header and authenticates with a Bearer token.

use serde_json::{json, Value};

use crate::types::blocks::Block;
use crate::types::bookmark::BookmarkDraft;
use crate::types::credentials::{Credentials, TargetMode};
use crate::types::errors::{ConnectionError, SyncError};

/// Production API origin.
pub const NOTION_API_BASE: &str = "https://api.notion.com";
/// Pinned protocol version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// HTTP client for the Notion API.
///
/// The base URL is injectable so tests can point the client at a local
/// stub server; production callers use [`NotionClient::new`].
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
}

impl NotionClient {
    pub fn new() -> Self {
        Self::with_base_url(NOTION_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Read-only probe confirming the credentials can reach the target.
    ///
    /// Issues a single GET against the page or database resource depending
    /// on the configured mode; succeeds iff the remote answers 2xx. Has no
    /// side effects on the remote and is never retried.
    pub async fn validate_target(&self, creds: &Credentials) -> Result<(), ConnectionError> {
        let path = match creds.mode {
            TargetMode::Page => format!("/v1/pages/{}", creds.target_id),
            TargetMode::Database => format!("/v1/databases/{}", creds.target_id),
        };

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&creds.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await
            .map_err(|e| ConnectionError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(target_id = %creds.target_id, "target validation succeeded");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(ConnectionError::rejected(
            status.as_u16(),
            remote_message(&body),
        ))
    }

    /// Appends composed blocks to a page target. Single atomic request;
    /// partial application by the remote is not modeled here.
    pub async fn append_children(
        &self,
        creds: &Credentials,
        blocks: &[Block],
    ) -> Result<(), SyncError> {
        let response = self
            .http
            .patch(format!(
                "{}/v1/blocks/{}/children",
                self.base_url, creds.target_id
            ))
            .bearer_auth(&creds.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&json!({ "children": blocks }))
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(SyncError::RemoteRejected {
            status: status.as_u16(),
            body,
        })
    }

    /// Creates one row in a database target, carrying the composed blocks
    /// as the row's page content. Returns the id of the created page when
    /// the response body includes one.
    pub async fn create_row(
        &self,
        creds: &Credentials,
        draft: &BookmarkDraft,
        blocks: &[Block],
    ) -> Result<Option<String>, SyncError> {
        let body = json!({
            "parent": { "database_id": creds.target_id },
            "properties": row_properties(draft),
            "children": blocks,
        });

        let response = self
            .http
            .post(format!("{}/v1/pages", self.base_url))
            .bearer_auth(&creds.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        let page: Value = response
            .json()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;
        Ok(page["id"].as_str().map(str::to_string))
    }
}

impl Default for NotionClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Database-row properties for one bookmark: `Name` (title, falling back to
/// the URL when no title was given), `URL`, and `Notes` when present.
fn row_properties(draft: &BookmarkDraft) -> Value {
    let name = draft
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&draft.url);

    let mut properties = json!({
        "Name": { "title": [{ "type": "text", "text": { "content": name } }] },
        "URL": { "url": draft.url },
    });

    if let Some(notes) = draft.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        properties["Notes"] = json!({
            "rich_text": [{ "type": "text", "text": { "content": notes } }]
        });
    }

    properties
}

/// Pulls the human-readable `message` out of a Notion error body, falling
/// back to the raw body so nothing the remote said is dropped.
fn remote_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
