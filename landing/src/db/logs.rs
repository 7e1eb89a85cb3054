//! `logs` テーブル操作
//!
//! レコードはJSONドキュメントとして1行に格納する（スキーマ非固定）。

use crate::audit::types::AuditLogRecord;
use crate::common::error::{LandingError, LandingResult};
use sqlx::SqlitePool;

/// 監査ログの格納先テーブル名
pub const LOGS_TABLE: &str = "logs";

/// `logs` テーブルが存在するか
pub async fn logs_table_exists(pool: &SqlitePool) -> LandingResult<bool> {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(LOGS_TABLE)
            .fetch_one(pool)
            .await
            .map_err(|e| LandingError::Connection(format!("Failed to list tables: {}", e)))?;
    Ok(row.0 > 0)
}

/// `logs` テーブルが無ければ作成する
///
/// 新規作成した場合は `true` を返す。
pub async fn ensure_logs_table(pool: &SqlitePool) -> LandingResult<bool> {
    if logs_table_exists(pool).await? {
        return Ok(false);
    }

    tracing::info!("Creating \"{}\" table as it does not exist", LOGS_TABLE);
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS logs (
            id INTEGER PRIMARY KEY,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            document TEXT NOT NULL CHECK (json_valid(document))
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| LandingError::Connection(format!("Failed to create logs table: {}", e)))?;

    Ok(true)
}

/// レコードを1件挿入する
pub async fn insert_log(pool: &SqlitePool, record: &AuditLogRecord) -> LandingResult<()> {
    let document = serde_json::to_string(record)
        .map_err(|e| LandingError::Persistence(format!("Failed to encode log record: {}", e)))?;

    sqlx::query("INSERT INTO logs (document) VALUES (?)")
        .bind(document)
        .execute(pool)
        .await
        .map_err(|e| LandingError::Persistence(format!("Failed to insert log record: {}", e)))?;

    Ok(())
}
