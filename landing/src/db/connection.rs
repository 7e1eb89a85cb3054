//! 接続ライフサイクル管理
//!
//! バックエンドストアへの接続を1度だけ確立し、その状態を `ConnectionState` として公開する。
//! 監査ログの永続化は `Ready` のときだけ試行される。
//!
//! 状態遷移: `Uninitialized → Connecting → Ready` または `Uninitialized → Connecting → Failed`。
//! `Failed` は終端で、再接続は行わない。稼働中に接続が失われても `Ready` のまま
//! 挿入が失敗し続ける（失敗はその都度ログに出る）。

use crate::audit::types::AuditLogRecord;
use crate::common::error::{LandingError, LandingResult};
use crate::config::{DatabaseConfig, DATABASE_NAME_ENV, DATABASE_URL_ENV};
use crate::db::logs;
use crate::db::traits::LogRepository;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::sync::{watch, Mutex};
use tracing::{error, info};

const MAX_CONNECTIONS: u32 = 5;

/// 接続状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// 未接続
    Uninitialized,
    /// 接続処理中
    Connecting,
    /// 接続済み（永続化可能）
    Ready,
    /// 接続失敗（終端）
    Failed,
}

impl ConnectionState {
    /// 文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// バックエンドストアへの接続ガード
///
/// 起動時に1度 `connect()` し、以後は `Arc` で共有して読み取りのみ行う。
pub struct DatabaseConnection {
    config: DatabaseConfig,
    state: watch::Sender<ConnectionState>,
    pool: Mutex<Option<SqlitePool>>,
}

impl DatabaseConnection {
    /// 未接続状態のガードを作成
    pub fn new(config: DatabaseConfig) -> Self {
        let (state, _) = watch::channel(ConnectionState::Uninitialized);
        Self {
            config,
            state,
            pool: Mutex::new(None),
        }
    }

    /// 現在の接続状態
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// 接続する（冪等）
    ///
    /// 接続済みなら既存のプールを返す。URLまたはDB名が未設定なら
    /// `Configuration`、オープンや疎通確認に失敗したら `Connection` を返す。
    pub async fn connect(&self) -> LandingResult<SqlitePool> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            info!("Already connected to the visitor database");
            return Ok(pool.clone());
        }
        if self.state() == ConnectionState::Failed {
            return Err(LandingError::Connection(
                "a previous connection attempt failed".to_string(),
            ));
        }

        let (url, name) = self.required_params()?;
        self.state.send_replace(ConnectionState::Connecting);

        match open_database(url, name).await {
            Ok(pool) => {
                *guard = Some(pool.clone());
                self.state.send_replace(ConnectionState::Ready);
                info!(database = %name, "Connected to the visitor database");
                Ok(pool)
            }
            Err(e) => {
                self.state.send_replace(ConnectionState::Failed);
                error!(database = %name, error = %e, "Visitor database connection failed");
                Err(e)
            }
        }
    }

    /// 接続済みプールを取得する
    pub async fn get_handle(&self) -> LandingResult<SqlitePool> {
        self.pool.lock().await.clone().ok_or_else(|| {
            LandingError::NotInitialized("call connect() before requesting a handle".to_string())
        })
    }

    /// 接続を閉じる（冪等）
    pub async fn close(&self) {
        let mut guard = self.pool.lock().await;
        match guard.take() {
            Some(pool) => {
                pool.close().await;
                self.state.send_replace(ConnectionState::Uninitialized);
                info!("Visitor database connection closed");
            }
            None => info!("No active visitor database connection to close"),
        }
    }

    fn required_params(&self) -> LandingResult<(&str, &str)> {
        match (self.config.url.as_deref(), self.config.name.as_deref()) {
            (Some(url), Some(name)) => Ok((url, name)),
            _ => Err(LandingError::Configuration(format!(
                "{} or {} is not defined. Check your environment variables.",
                DATABASE_URL_ENV, DATABASE_NAME_ENV
            ))),
        }
    }
}

#[async_trait]
impl LogRepository for DatabaseConnection {
    fn is_ready(&self) -> bool {
        self.state() == ConnectionState::Ready
    }

    async fn insert_log(&self, record: &AuditLogRecord) -> Result<(), LandingError> {
        let pool = self.get_handle().await?;
        logs::insert_log(&pool, record).await
    }
}

/// URLとDB名からSQLiteの接続オプションを組み立てる
///
/// URLのパスはデータディレクトリを表し、`<dir>/<name>.db` を開く。
/// `sqlite::memory:` はインメモリDBを開き、名前はラベルとしてのみ使う。
pub fn database_options(url: &str, name: &str) -> LandingResult<SqliteConnectOptions> {
    validate_database_name(name)?;
    let url = url.trim();

    if url.contains(":memory:") {
        return SqliteConnectOptions::from_str(url)
            .map_err(|e| LandingError::Configuration(format!("Invalid database URL: {}", e)));
    }

    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .ok_or_else(|| {
            LandingError::Configuration(format!(
                "Unsupported database URL '{}': expected a sqlite: URL",
                url
            ))
        })?;
    let dir = path.split('?').next().unwrap_or(path);
    let dir = if dir.is_empty() { "." } else { dir };

    let file: PathBuf = PathBuf::from(dir).join(format!("{}.db", name));
    Ok(SqliteConnectOptions::new()
        .filename(file)
        .create_if_missing(true))
}

fn validate_database_name(name: &str) -> LandingResult<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(LandingError::Configuration(format!(
            "Invalid database name '{}': use letters, digits, '_', '-' or '.'",
            name
        )))
    }
}

async fn open_database(url: &str, name: &str) -> LandingResult<SqlitePool> {
    let options = database_options(url, name)?;

    // ファイルDBはディレクトリが無いと作成できないため先に作る
    let filename = options.get_filename();
    if !url.contains(":memory:") {
        if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LandingError::Connection(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| LandingError::Connection(format!("Failed to open database: {}", e)))?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| LandingError::Connection(format!("Database handshake failed: {}", e)))?;

    logs::ensure_logs_table(&pool).await?;

    Ok(pool)
}
