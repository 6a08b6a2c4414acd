//! Notemark RPC Server — JSON-RPC over stdin/stdout for popup integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.append", "params":{"url":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! On stdin EOF (host closed the popup) pending draft writes are flushed
//! before exit so a paste followed by an immediate close is never lost.

use std::io::Write;
use std::path::PathBuf;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use notemark::app::App;
use notemark::platform;
use notemark::rpc_handler::handle_method;

fn db_path() -> PathBuf {
    if let Ok(dir) = std::env::var("NOTEMARK_DATA_DIR") {
        PathBuf::from(dir).join("notemark.db")
    } else {
        platform::default_db_path()
    }
}

fn respond(value: Value) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{}", value);
    let _ = stdout.flush();
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = db_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let app = match path.to_str().map(App::new) {
        Some(Ok(app)) => app,
        Some(Err(e)) => {
            tracing::error!("failed to open settings store at {}: {}", path.display(), e);
            std::process::exit(1);
        }
        None => {
            tracing::error!("settings store path is not valid UTF-8: {}", path.display());
            std::process::exit(1);
        }
    };

    // Signal ready
    respond(json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(response);
    }

    if let Err(e) = app.shutdown() {
        tracing::warn!("draft flush on shutdown failed: {}", e);
    }
}
