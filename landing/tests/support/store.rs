//! スタブの永続化先

use async_trait::async_trait;
use landing::audit::types::AuditLogRecord;
use landing::common::error::LandingError;
use landing::db::traits::LogRepository;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 挿入呼び出しを記録するストア
#[allow(dead_code)]
pub struct RecordingStore {
    ready: bool,
    fail: bool,
    calls: AtomicUsize,
    records: Mutex<Vec<AuditLogRecord>>,
}

#[allow(dead_code)]
impl RecordingStore {
    /// 未接続（挿入されないはず）
    pub fn not_ready() -> Self {
        Self::new(false, false)
    }

    /// 接続済みで挿入成功
    pub fn ready() -> Self {
        Self::new(true, false)
    }

    /// 接続済みだが挿入は常に失敗
    pub fn failing() -> Self {
        Self::new(true, true)
    }

    fn new(ready: bool, fail: bool) -> Self {
        Self {
            ready,
            fail,
            calls: AtomicUsize::new(0),
            records: Mutex::new(Vec::new()),
        }
    }

    /// 挿入呼び出し回数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 保存に成功したレコード
    pub fn records(&self) -> Vec<AuditLogRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogRepository for RecordingStore {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn insert_log(&self, record: &AuditLogRecord) -> Result<(), LandingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(LandingError::Persistence("stub store failure".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
