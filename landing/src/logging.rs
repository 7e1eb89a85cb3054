//! ロギング初期化ユーティリティ
//!
//! 標準出力（text/json）と任意の日次ローテーションファイルへ出力する。
//! フィルタは `RUST_LOG` > `LANDING_LOG_LEVEL` > `info` の優先順位で決定する。
//! 監査レコードは `info` で出るため、どのフィルタでも `landing::audit=info` を追加する。

use crate::audit::middleware::AUDIT_TARGET;
use crate::common::error::{LandingError, LandingResult};
use crate::config::get_env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Directive, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// ログファイル名（日付サフィックスが付与される）
const LOG_FILE_PREFIX: &str = "landing.log";

/// 標準出力のログ形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 人間向けテキスト
    Text,
    /// 1行1JSON
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// ロギング設定
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `RUST_LOG` 未設定時のフィルタ
    pub level: String,
    /// 標準出力の形式
    pub format: LogFormat,
    /// ファイル出力先ディレクトリ
    pub log_dir: Option<String>,
}

impl LoggingConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Self {
        Self {
            level: get_env("LANDING_LOG_LEVEL")
                .unwrap_or_else(|| "info".to_string()),
            format: get_env("LANDING_LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(LogFormat::Text),
            log_dir: get_env("LANDING_LOG_DIR")
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// グローバルsubscriberを初期化する
///
/// ファイル出力が有効な場合は返却される `WorkerGuard` をプロセス終了まで保持すること。
pub fn init() -> Result<Option<WorkerGuard>, LandingError> {
    init_with(LoggingConfig::from_env())
}

/// 指定設定でグローバルsubscriberを初期化する
pub fn init_with(config: LoggingConfig) -> Result<Option<WorkerGuard>, LandingError> {
    let filter = build_filter(&config.level)?;

    let stdout_layer = match config.format {
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
    };

    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| {
                LandingError::Configuration(format!(
                    "Failed to create log directory {}: {}",
                    dir, e
                ))
            })?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LandingError::Configuration(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

/// レベル指定に監査ターゲットの `info` を加えたフィルタを作る
fn build_filter(level: &str) -> LandingResult<EnvFilter> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let audit = format!("{}=info", AUDIT_TARGET).parse::<Directive>().map_err(|e| {
        LandingError::Configuration(format!("Invalid audit log directive: {}", e))
    })?;
    Ok(filter.add_directive(audit))
}
