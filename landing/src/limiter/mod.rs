//! クライアント単位のリクエスト流量制限
//!
//! クライアントアドレスごとに固定ウィンドウでリクエスト数を数える。
//! ウィンドウはそのクライアントの最初のリクエストで開始し、期間経過でリセットされる。

/// 流量制限ミドルウェア
pub mod middleware;

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// 制限判定の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// 受理
    Allowed,
    /// 拒否（ウィンドウがリセットされるまでの時間）
    Rejected {
        /// リセットまでの待ち時間
        retry_after: Duration,
    },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// 固定ウィンドウ方式の流量制限
#[derive(Debug)]
pub struct FixedWindowLimiter {
    windows: Mutex<HashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    /// 設定から作成
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests: config.max_requests,
            window: config.window,
        }
    }

    /// ウィンドウ長
    pub fn window(&self) -> Duration {
        self.window
    }

    /// 現在時刻で判定する
    pub async fn check(&self, key: &str) -> Admission {
        self.check_at(key, Instant::now()).await
    }

    /// 指定時刻で判定し、受理した場合はカウントを進める
    pub async fn check_at(&self, key: &str, now: Instant) -> Admission {
        let mut windows = self.windows.lock().await;
        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.saturating_duration_since(window.started_at) >= self.window {
            *window = Window {
                started_at: now,
                count: 0,
            };
        }

        if window.count >= self.max_requests {
            let elapsed = now.saturating_duration_since(window.started_at);
            let retry_after = self.window.saturating_sub(elapsed);
            warn!(client = key, "Rate limit exceeded");
            return Admission::Rejected { retry_after };
        }

        window.count += 1;
        let remaining = self.max_requests - window.count;
        debug!(client = key, remaining, "Rate limit check passed");
        Admission::Allowed
    }

    /// 期限切れのウィンドウを破棄し、破棄した件数を返す
    pub async fn evict_expired_at(&self, now: Instant) -> usize {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, w| now.saturating_duration_since(w.started_at) < self.window);
        before - windows.len()
    }

    /// 追跡中のクライアント数
    pub async fn tracked_clients(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// ウィンドウ長ごとに期限切れウィンドウを破棄するタスクを起動する
pub fn start_cleanup_task(limiter: Arc<FixedWindowLimiter>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(limiter.window());
        // 最初のtickは即時に発火する
        interval.tick().await;
        loop {
            interval.tick().await;
            let evicted = limiter.evict_expired_at(Instant::now()).await;
            if evicted > 0 {
                let tracked = limiter.tracked_clients().await;
                debug!(
                    evicted,
                    tracked,
                    "Evicted expired rate limit windows"
                );
            }
        }
    })
}
