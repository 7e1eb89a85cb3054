//! 監査ログ永続化E2Eテスト

use landing::audit::writer::AuditLogWriter;
use landing::config::DatabaseConfig;
use landing::db::connection::DatabaseConnection;
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;

use crate::support;
use support::http::spawn_landing;
use support::store::RecordingStore;

#[tokio::test]
async fn nothing_is_persisted_when_store_not_ready() {
    let store = Arc::new(RecordingStore::not_ready());
    let mut state = support::unconnected_state(100, false);
    state.audit_writer = AuditLogWriter::new(store.clone());
    let server = spawn_landing(state).await;

    let client = Client::new();
    for path in ["/", "/terms", "/missing"] {
        client.get(server.url(path)).send().await.unwrap();
    }
    server.stop().await;

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn failing_store_does_not_affect_response() {
    let store = Arc::new(RecordingStore::failing());
    let mut state = support::unconnected_state(100, false);
    state.audit_writer = AuditLogWriter::new(store.clone());
    let server = spawn_landing(state).await;

    let res = Client::new().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(support::wait_until(|| store.calls() == 1).await);

    server.stop().await;
}

#[tokio::test]
async fn record_matches_request_and_session() {
    let store = Arc::new(RecordingStore::ready());
    let mut state = support::unconnected_state(100, false);
    state.audit_writer = AuditLogWriter::new(store.clone());
    let server = spawn_landing(state).await;

    let res = Client::new()
        .get(server.url("/pricing?plan=pro"))
        .header(header::USER_AGENT, "e2e-agent")
        .header("cf-ipcity", "Mumbai")
        .send()
        .await
        .unwrap();
    let set_cookie = res.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    let body = res.bytes().await.unwrap();
    assert!(support::wait_until(|| store.records().len() == 1).await);
    server.stop().await;

    let record = store.records().remove(0);
    assert_eq!(record.method, "GET");
    assert_eq!(record.url, "/pricing?plan=pro");
    assert_eq!(record.status, 200);
    assert_eq!(record.content_length, body.len() as u64);
    assert_eq!(record.user_agent.as_deref(), Some("e2e-agent"));
    assert_eq!(record.remote_addr, "127.0.0.1");
    assert_eq!(record.city, "Mumbai");
    assert_eq!(record.country, "Unknown");
    assert_eq!(record.env_type, "TEST");
    assert_eq!(record.part, "LANDING PAGE PART");
    assert!(set_cookie.contains(&record.session_id));
    assert!(record.response_time.ends_with(" ms"));
}

#[tokio::test]
async fn records_are_written_to_sqlite_logs_table() {
    let dir = tempfile::tempdir().unwrap();
    let db = Arc::new(DatabaseConnection::new(DatabaseConfig {
        url: Some(format!("sqlite://{}", dir.path().display())),
        name: Some("visitor".to_string()),
    }));
    let pool = db.connect().await.unwrap();
    let server = spawn_landing(support::state_with_db(db.clone(), 100, false)).await;

    let res = Client::new().get(server.url("/support")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let mut stored = None;
    for _ in 0..200 {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT json_extract(document, '$.url') FROM logs LIMIT 1")
                .fetch_optional(&pool)
                .await
                .unwrap();
        if let Some((url,)) = row {
            stored = Some(url);
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(stored.as_deref(), Some("/support"));

    server.stop().await;
    assert!(db.get_handle().await.is_err(), "serve should close the database");
}
