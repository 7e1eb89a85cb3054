//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! 起動時の `Configuration` / `Connection` は致命的エラーとしてプロセスを終了させる。
//! リクエスト処理中に発生したエラーはその場で吸収し、クライアントには
//! `external_message()` の汎用メッセージのみを返す。

use axum::http::StatusCode;
use thiserror::Error;

/// landing server error type
#[derive(Debug, Error)]
pub enum LandingError {
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Backing store could not be opened or did not answer the handshake
    #[error("Connection error: {0}")]
    Connection(String),

    /// Handle requested before a successful connect
    #[error("Database not initialized: {0}")]
    NotInitialized(String),

    /// A single audit log insert failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// Listener could not be bound or the HTTP server stopped with an error
    #[error("Server error: {0}")]
    Server(String),
}

impl LandingError {
    /// Returns a safe error message for external clients.
    ///
    /// Full details (`to_string()`) belong in server logs only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "Service misconfigured",
            Self::Connection(_) => "Service temporarily unavailable",
            Self::NotInitialized(_) => "Service temporarily unavailable",
            Self::Persistence(_) => "Internal server error",
            Self::Render(_) => "Internal server error",
            Self::Server(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotInitialized(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 起動を中断すべきエラーか
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Connection(_))
    }
}

impl From<minijinja::Error> for LandingError {
    fn from(err: minijinja::Error) -> Self {
        LandingError::Render(err.to_string())
    }
}

/// Result type alias
pub type LandingResult<T> = Result<T, LandingError>;
