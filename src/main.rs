//! Notemark — save-to-Notion bookmark clipper core.
//!
//! Entry point: runs a console demo of the offline components. The real
//! host integration lives in the `notemark-rpc` binary.

use std::sync::Arc;

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Notemark v{} — Demo Mode                    ║", env!("CARGO_PKG_VERSION"));
    println!("║          Save-to-Notion bookmark clipper core              ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_storage();
    demo_settings();
    demo_composer();
    demo_url_validation();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All offline components demonstrated successfully!");
    println!("  Run the notemark-rpc binary for host integration.");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_storage() {
    use notemark::storage::database::SqliteStore;
    use notemark::storage::KeyValueStore;
    section("Storage Layer");

    let store = SqliteStore::open_in_memory().expect("Failed to open store");
    store
        .set("demo_key", serde_json::json!({"hello": "notion"}))
        .expect("write failed");
    let value = store.get("demo_key").expect("read failed");
    println!("  Stored and read back: {}", value.unwrap_or_default());
    println!("  ✓ SQLite store + migrations OK");
    println!();
}

fn demo_settings() {
    use notemark::services::settings_repository::{SettingsRepository, SettingsRepositoryTrait};
    use notemark::storage::MemoryStore;
    use notemark::types::credentials::{Credentials, TargetMode};
    section("Settings Repository");

    let repo = SettingsRepository::new(Arc::new(MemoryStore::new()));
    println!("  Fresh store, credentials: {:?}", repo.get_credentials());

    let creds = Credentials::new("secret_demo", "page-id-123", TargetMode::Page);
    repo.save_credentials(&creds).expect("save failed");
    println!(
        "  After save, configured: {}",
        repo.get_credentials().is_some()
    );
    println!("  ✓ Settings roundtrip OK");
    println!();
}

fn demo_composer() {
    use chrono::Utc;
    use notemark::services::composer::compose_entry;
    use notemark::types::bookmark::BookmarkDraft;
    section("Bookmark Composer");

    let draft = BookmarkDraft::new("https://www.rust-lang.org")
        .with_title("Rust")
        .with_notes("Read the async book");
    let blocks = compose_entry(&draft, Utc::now());
    println!("  Composed {} blocks:", blocks.len());
    for block in &blocks {
        println!("    {}", serde_json::to_string(block).unwrap_or_default());
    }
    println!("  ✓ Canonical layout OK");
    println!();
}

fn demo_url_validation() {
    use notemark::services::sync_engine::validate_bookmark_url;
    section("URL Validation");

    for url in ["https://example.com", "javascript:alert(1)", "not a url"] {
        let verdict = match validate_bookmark_url(url) {
            Ok(()) => "accepted",
            Err(_) => "rejected",
        };
        println!("  {:40} -> {}", url, verdict);
    }
    println!("  ✓ Scheme restriction OK");
    println!();
}
