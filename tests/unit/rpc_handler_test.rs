//! Unit tests for the JSON-RPC dispatch layer, driving the popup flows
//! end to end through `handle_method` with an in-memory store and a local
//! HTTP stub standing in for the Notion API.

mod http_stub;

use std::sync::Arc;

use http_stub::StubServer;
use serde_json::json;

use notemark::app::App;
use notemark::rpc_handler::handle_method;
use notemark::services::notion_client::NotionClient;
use notemark::services::settings_repository::SettingsRepositoryTrait;
use notemark::services::sync_engine::SyncEngine;
use notemark::storage::MemoryStore;

fn offline_app() -> App {
    App::with_store(Arc::new(MemoryStore::new()))
}

fn app_against(server: &StubServer) -> App {
    App::with_parts(
        Arc::new(MemoryStore::new()),
        SyncEngine::new(NotionClient::with_base_url(&server.base_url)),
    )
}

#[tokio::test]
async fn test_ping() {
    let app = offline_app();
    let result = handle_method(&app, "ping", &json!({})).await.unwrap();
    assert_eq!(result, json!({"pong": true}));
}

#[tokio::test]
async fn test_unknown_method_is_an_error() {
    let app = offline_app();
    let err = handle_method(&app, "nope.nothing", &json!({})).await.unwrap_err();
    assert!(err.contains("unknown method"));
}

#[tokio::test]
async fn test_tab_report_then_current() {
    let app = offline_app();

    let err = handle_method(&app, "tab.current", &json!({})).await.unwrap_err();
    assert!(err.contains("unavailable"));

    handle_method(
        &app,
        "tab.report",
        &json!({"url": "https://example.com", "title": "Example"}),
    )
    .await
    .unwrap();

    let tab = handle_method(&app, "tab.current", &json!({})).await.unwrap();
    assert_eq!(tab, json!({"url": "https://example.com", "title": "Example"}));
}

#[tokio::test]
async fn test_settings_get_reports_unconfigured_on_empty_store() {
    let app = offline_app();
    let result = handle_method(&app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(result["configured"], false);
    assert_eq!(result["credentials"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_draft_update_and_read() {
    let app = offline_app();

    handle_method(
        &app,
        "settings.draft.update",
        &json!({"field": "api_key", "value": "half-typ"}),
    )
    .await
    .unwrap();

    let draft = handle_method(&app, "settings.draft", &json!({})).await.unwrap();
    assert_eq!(draft["api_key"], "half-typ");
    assert!(draft.get("target_id").is_none());

    handle_method(&app, "settings.draft.clear", &json!({})).await.unwrap();
    let draft = handle_method(&app, "settings.draft", &json!({})).await.unwrap();
    assert_eq!(draft, json!({}));
}

#[tokio::test]
async fn test_draft_update_rejects_unknown_field() {
    let app = offline_app();
    let err = handle_method(
        &app,
        "settings.draft.update",
        &json!({"field": "password", "value": "x"}),
    )
    .await
    .unwrap_err();
    assert!(err.contains("unknown field"));
}

/// Full configuration flow over RPC: save validates against the remote,
/// promotes the credentials, and clears the draft.
#[tokio::test]
async fn test_settings_save_validates_promotes_and_clears_draft() {
    let server = StubServer::start(200, r#"{"object":"page"}"#).await;
    let app = app_against(&server);

    handle_method(
        &app,
        "settings.draft.update",
        &json!({"field": "api_key", "value": "secret_k", "paste": true}),
    )
    .await
    .unwrap();

    handle_method(
        &app,
        "settings.save",
        &json!({"api_key": "secret_k", "target_id": "page-1", "mode": "page"}),
    )
    .await
    .unwrap();

    // One validation GET went out.
    assert_eq!(server.requests()[0].path, "/v1/pages/page-1");

    let settings = handle_method(&app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(settings["configured"], true);
    assert_eq!(settings["credentials"]["api_key"], "secret_k");

    assert!(app.settings.get_draft().is_empty());
}

/// A failed validation leaves nothing persisted and the draft intact.
#[tokio::test]
async fn test_settings_save_failure_keeps_draft() {
    let server = StubServer::start(401, r#"{"message":"API token is invalid."}"#).await;
    let app = app_against(&server);

    handle_method(
        &app,
        "settings.draft.update",
        &json!({"field": "api_key", "value": "bad_key", "paste": true}),
    )
    .await
    .unwrap();

    let err = handle_method(
        &app,
        "settings.save",
        &json!({"api_key": "bad_key", "target_id": "page-1"}),
    )
    .await
    .unwrap_err();
    assert!(err.contains("API token is invalid."));

    let settings = handle_method(&app, "settings.get", &json!({})).await.unwrap();
    assert_eq!(settings["configured"], false);
    assert_eq!(app.settings.get_draft().api_key.as_deref(), Some("bad_key"));
}

#[tokio::test]
async fn test_bookmark_append_requires_configuration() {
    let app = offline_app();
    let err = handle_method(
        &app,
        "bookmark.append",
        &json!({"url": "https://example.com"}),
    )
    .await
    .unwrap_err();
    assert!(err.contains("not configured"));
}

/// Capture flow over RPC: tab reported by the host, credentials saved,
/// append lands on the page endpoint.
#[tokio::test]
async fn test_bookmark_append_uses_reported_tab() {
    let server = StubServer::start(200, r#"{"object":"list","results":[]}"#).await;
    let app = app_against(&server);

    handle_method(
        &app,
        "settings.save",
        &json!({"api_key": "secret_k", "target_id": "page-1"}),
    )
    .await
    .unwrap();

    handle_method(
        &app,
        "tab.report",
        &json!({"url": "https://blog.example/post", "title": "A Post"}),
    )
    .await
    .unwrap();

    let entry = handle_method(&app, "bookmark.append", &json!({"notes": "later"}))
        .await
        .unwrap();
    assert_eq!(entry["target_id"], "page-1");

    let append = server
        .requests()
        .into_iter()
        .find(|r| r.method == "PATCH")
        .expect("append request");
    let body: serde_json::Value = serde_json::from_str(&append.body).unwrap();
    let children = body["children"].as_array().unwrap();
    // separator + timestamp + title + link + notes
    assert_eq!(children.len(), 5);
    assert_eq!(children[3]["bookmark"]["url"], "https://blog.example/post");
}
