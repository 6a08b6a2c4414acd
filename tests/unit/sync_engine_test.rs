//! Integration tests for the sync engine against a local HTTP stub:
//! connection validation, page-mode append, database-mode row creation,
//! and pre-network URL rejection.

mod http_stub;

use http_stub::StubServer;

use notemark::services::notion_client::{NotionClient, NOTION_VERSION};
use notemark::services::sync_engine::SyncEngine;
use notemark::types::bookmark::BookmarkDraft;
use notemark::types::credentials::{Credentials, TargetMode};
use notemark::types::errors::SyncError;

fn engine(server: &StubServer) -> SyncEngine {
    SyncEngine::new(NotionClient::with_base_url(&server.base_url))
}

fn page_creds() -> Credentials {
    Credentials::new("secret_token", "page-123", TargetMode::Page)
}

fn db_creds() -> Credentials {
    Credentials::new("secret_token", "db-456", TargetMode::Database)
}

#[tokio::test]
async fn test_connection_probe_hits_page_endpoint_with_auth() {
    let server = StubServer::start(200, r#"{"object":"page","id":"page-123"}"#).await;
    engine(&server).test_connection(&page_creds()).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/v1/pages/page-123");
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer secret_token")
    );
    assert_eq!(requests[0].notion_version.as_deref(), Some(NOTION_VERSION));
}

#[tokio::test]
async fn test_connection_probe_uses_database_endpoint_in_database_mode() {
    let server = StubServer::start(200, r#"{"object":"database","id":"db-456"}"#).await;
    engine(&server).test_connection(&db_creds()).await.unwrap();

    assert_eq!(server.requests()[0].path, "/v1/databases/db-456");
}

#[tokio::test]
async fn test_connection_rejection_carries_status_and_remote_message() {
    let server = StubServer::start(
        401,
        r#"{"object":"error","status":401,"message":"API token is invalid."}"#,
    )
    .await;

    let err = engine(&server)
        .test_connection(&page_creds())
        .await
        .unwrap_err();
    assert_eq!(err.http_status, Some(401));
    assert_eq!(err.message, "API token is invalid.");
}

/// Calling the probe twice with unchanged valid credentials succeeds twice;
/// both calls are plain GETs with no mutation.
#[tokio::test]
async fn test_connection_probe_is_idempotent()  {
    let server = StubServer::start(200, r#"{"object":"page"}"#).await;
    let engine = engine(&server);
    let creds = page_creds();

    engine.test_connection(&creds).await.unwrap();
    engine.test_connection(&creds).await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.method == "GET"));
}

#[tokio::test]
async fn test_page_mode_append_patches_children() {
    let server = StubServer::start(200, r#"{"object":"list","results":[]}"#).await;
    let draft = BookmarkDraft::new("https://example.com/article").with_title("Article");

    let entry = engine(&server)
        .append_bookmark(&page_creds(), &draft)
        .await
        .unwrap();
    assert_eq!(entry.target_id, "page-123");
    assert_eq!(entry.page_id, None);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].path, "/v1/blocks/page-123/children");

    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    let children = body["children"].as_array().unwrap();
    assert_eq!(children.len(), 4);
    assert_eq!(children[3]["bookmark"]["url"], "https://example.com/article");
}

#[tokio::test]
async fn test_database_mode_creates_row_with_properties_and_children() {
    let server = StubServer::start(200, r#"{"object":"page","id":"row-789"}"#).await;
    let draft = BookmarkDraft::new("https://example.com")
        .with_title("Docs")
        .with_notes("read later");

    let entry = engine(&server)
        .append_bookmark(&db_creds(), &draft)
        .await
        .unwrap();
    assert_eq!(entry.target_id, "db-456");
    assert_eq!(entry.page_id.as_deref(), Some("row-789"));

    let requests = server.requests();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/v1/pages");

    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["parent"]["database_id"], "db-456");
    assert_eq!(body["properties"]["Name"]["title"][0]["text"]["content"], "Docs");
    assert_eq!(body["properties"]["URL"]["url"], "https://example.com");
    assert_eq!(body["children"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_remote_rejection_surfaces_status_and_body() {
    let server = StubServer::start(404, r#"{"message":"Could not find block"}"#).await;
    let draft = BookmarkDraft::new("https://example.com");

    let err = engine(&server)
        .append_bookmark(&page_creds(), &draft)
        .await
        .unwrap_err();
    match err {
        SyncError::RemoteRejected { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Could not find block"));
        }
        other => panic!("expected RemoteRejected, got {:?}", other),
    }
}

/// A non-web URL is rejected before any request leaves the process.
#[tokio::test]
async fn test_invalid_url_issues_no_network_call() {
    let server = StubServer::start(200, "{}").await;
    let draft = BookmarkDraft::new("javascript:alert(1)");

    let err = engine(&server)
        .append_bookmark(&page_creds(), &draft)
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::InvalidUrl(_)));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_unreachable_remote_is_a_transport_error() {
    // Port from a listener that is immediately dropped: nothing is bound.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let engine = SyncEngine::new(NotionClient::with_base_url(format!(
        "http://127.0.0.1:{}",
        port
    )));

    let err = engine
        .append_bookmark(&page_creds(), &BookmarkDraft::new("https://example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Transport(_)));
}
