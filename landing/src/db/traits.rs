//! Repository traitパターン定義
//!
//! 監査ログの永続化先を抽象化し、レコーダーをスタブストアでテストできるようにする。

use async_trait::async_trait;

use crate::audit::types::AuditLogRecord;
use crate::common::error::LandingError;

/// 監査ログ永続化先のRepository trait
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// 書き込みを試行してよい状態か（接続準備完了）
    fn is_ready(&self) -> bool;

    /// レコードを `logs` に1件挿入する
    async fn insert_log(&self, record: &AuditLogRecord) -> Result<(), LandingError>;
}
