//! RPC method handler for the Notemark JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! popup core via the `App` struct.

use serde_json::{json, Value};

use crate::app::{App, SessionState};
use crate::services::settings_repository::{SettingsRepositoryTrait, WritePolicy};
use crate::services::tab_probe::TabProbe;
use crate::types::bookmark::TabInfo;
use crate::types::credentials::{Credentials, DraftField, TargetMode};

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Tab ───
        "tab.report" => {
            let url = params
                .get("url")
                .and_then(|v| v.as_str())
                .ok_or("missing url")?;
            let title = params.get("title").and_then(|v| v.as_str());
            app.tabs.set_tab(TabInfo {
                url: url.to_string(),
                title: title.map(str::to_string),
            });
            Ok(json!({"ok": true}))
        }
        "tab.current" => {
            let tab = app.tabs.current_tab().map_err(|e| e.to_string())?;
            Ok(json!({"url": tab.url, "title": tab.title}))
        }

        // ─── Settings ───
        "settings.get" => {
            let configured = app.session_state() == SessionState::Configured;
            let credentials = app
                .settings
                .get_credentials()
                .and_then(|c| serde_json::to_value(c).ok());
            Ok(json!({"configured": configured, "credentials": credentials}))
        }
        "settings.save" => {
            let creds = parse_credentials(params)?;
            app.confirm_credentials(&creds)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.clear" => {
            app.settings.clear_credentials().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Draft ───
        "settings.draft" => {
            serde_json::to_value(app.settings.get_draft()).map_err(|e| e.to_string())
        }
        "settings.draft.update" => {
            let field = params
                .get("field")
                .and_then(|v| v.as_str())
                .and_then(DraftField::parse)
                .ok_or("missing or unknown field")?;
            let value = params
                .get("value")
                .and_then(|v| v.as_str())
                .ok_or("missing value")?;
            let policy = if params.get("paste").and_then(|v| v.as_bool()).unwrap_or(false) {
                WritePolicy::Immediate
            } else {
                WritePolicy::Debounced
            };
            app.settings.update_draft_field(field, value, policy);
            Ok(json!({"ok": true}))
        }
        "settings.draft.clear" => {
            app.settings.clear_draft().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Notion ───
        "connection.test" => {
            // Explicit credentials when given (pre-save check), otherwise
            // the stored ones.
            let creds = if params.get("api_key").is_some() {
                parse_credentials(params)?
            } else {
                app.settings
                    .get_credentials()
                    .ok_or("no credentials configured")?
            };
            app.sync
                .test_connection(&creds)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.append" => {
            let url = params.get("url").and_then(|v| v.as_str()).map(str::to_string);
            let title = params
                .get("title")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let notes = params
                .get("notes")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let entry = app
                .capture_bookmark(url, title, notes)
                .await
                .map_err(|e| e.to_string())?;
            serde_json::to_value(entry).map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

fn parse_credentials(params: &Value) -> Result<Credentials, String> {
    let api_key = params
        .get("api_key")
        .and_then(|v| v.as_str())
        .ok_or("missing api_key")?;
    let target_id = params
        .get("target_id")
        .and_then(|v| v.as_str())
        .ok_or("missing target_id")?;
    let mode = match params.get("mode").and_then(|v| v.as_str()) {
        Some("database") => TargetMode::Database,
        Some("page") | None => TargetMode::Page,
        Some(other) => return Err(format!("unknown mode: {}", other)),
    };
    Ok(Credentials::new(api_key, target_id, mode))
}
