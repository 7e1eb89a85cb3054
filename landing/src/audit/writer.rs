//! 監査ログの永続化ライター
//!
//! レコードごとに独立したタスクで `logs` へ1回だけ書き込む。
//! レスポンスは書き込み完了を待たない。
//!
//! 同時に走る書き込みタスク数に上限はない。ストアが遅いと未完了タスクが溜まり続ける。

use crate::audit::types::AuditLogRecord;
use crate::db::traits::LogRepository;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, trace};

/// 監査ログの非同期ライター
///
/// Clone可能（リポジトリの `Arc` を共有）。
#[derive(Clone)]
pub struct AuditLogWriter {
    repo: Arc<dyn LogRepository>,
}

impl AuditLogWriter {
    /// 永続化先を指定して作成
    pub fn new(repo: Arc<dyn LogRepository>) -> Self {
        Self { repo }
    }

    /// レコードの永続化を開始する
    ///
    /// ストアが未接続なら何もせず `None` を返す。失敗はログに出すのみで再試行しない。
    pub fn persist(&self, record: AuditLogRecord) -> Option<JoinHandle<()>> {
        if !self.repo.is_ready() {
            trace!(url = %record.url, "Visitor database not ready, skipping persistence");
            return None;
        }

        let repo = self.repo.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = repo.insert_log(&record).await {
                error!(
                    url = %record.url,
                    session_id = %record.session_id,
                    error = %e,
                    "Failed to insert access log"
                );
            }
        }))
    }
}
