//! 結合テスト共通ユーティリティ

pub mod http;
pub mod store;

use landing::config::{AuditConfig, DatabaseConfig, RateLimitConfig};
use landing::db::connection::DatabaseConnection;
use landing::AppState;
use std::sync::Arc;
use std::time::Duration;

/// 未接続のデータベースを持つ状態を組み立てる
#[allow(dead_code)]
pub fn unconnected_state(max_requests: u32, trust_proxy: bool) -> AppState {
    state_with_db(
        Arc::new(DatabaseConnection::new(DatabaseConfig::default())),
        max_requests,
        trust_proxy,
    )
}

/// 指定したデータベースで状態を組み立てる
#[allow(dead_code)]
pub fn state_with_db(
    db: Arc<DatabaseConnection>,
    max_requests: u32,
    trust_proxy: bool,
) -> AppState {
    AppState::new(
        db,
        AuditConfig {
            env_type: "TEST".to_string(),
            ..AuditConfig::default()
        },
        RateLimitConfig {
            max_requests,
            window: Duration::from_secs(900),
        },
        trust_proxy,
        "public".into(),
    )
    .expect("failed to build app state")
}

/// 条件が満たされるまで待つ（最大2秒）
#[allow(dead_code)]
pub async fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
