//! Configuration management via environment variables
//!
//! Every setting has a `LANDING_*` name. Only the settings the previous
//! deployment actually used (`MONGO_URI_VISITOR`, `MONGO_DB_VISITOR`, `PORT`
//! and `ENV_TYPE`) are still read under their old names, with a deprecation warning.

use std::time::Duration;

/// Database URL (required)
pub const DATABASE_URL_ENV: &str = "LANDING_DATABASE_URL";
const LEGACY_DATABASE_URL_ENV: &str = "MONGO_URI_VISITOR";
/// Logical database name (required)
pub const DATABASE_NAME_ENV: &str = "LANDING_DATABASE_NAME";
const LEGACY_DATABASE_NAME_ENV: &str = "MONGO_DB_VISITOR";

/// Default environment tag written into every audit record
pub const DEFAULT_ENV_TYPE: &str = "DEVELOPMENT";
/// Default classification tag written into every audit record
pub const DEFAULT_PART: &str = "LANDING PAGE PART";

/// Get an environment variable without a legacy name
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Get an environment variable or a default value
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable parsed to a specific type
///
/// Falls back to `default` when the variable is unset or parsing fails.
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    get_env(name).and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use landing::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("LANDING_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Falls back to `default` when neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// `true/1/yes/on` を真として扱う
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Backing store connection parameters
///
/// Both values are optional here; `DatabaseConnection::connect` rejects
/// missing ones with a configuration error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// SQLite URL naming the data directory (or `sqlite::memory:`)
    pub url: Option<String>,
    /// Logical database name (file stem inside the data directory)
    pub name: Option<String>,
}

impl DatabaseConfig {
    /// Load database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: get_env_with_fallback(DATABASE_URL_ENV, LEGACY_DATABASE_URL_ENV)
                .filter(|v| !v.trim().is_empty()),
            name: get_env_with_fallback(DATABASE_NAME_ENV, LEGACY_DATABASE_NAME_ENV)
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// Request admission limiter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests per client within one window.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    /// Load limiter configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let max_requests = get_env_parse("LANDING_RATE_LIMIT_MAX", defaults.max_requests);
        let window_secs =
            get_env_parse("LANDING_RATE_LIMIT_WINDOW_SECS", defaults.window.as_secs());
        Self {
            max_requests,
            window: Duration::from_secs(window_secs.max(1)),
        }
    }
}

/// 監査レコードに埋め込むデプロイ情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// デプロイ環境タグ（例: `PRODUCTION`）
    pub env_type: String,
    /// 記録元を示す分類タグ
    pub part: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            env_type: DEFAULT_ENV_TYPE.to_string(),
            part: DEFAULT_PART.to_string(),
        }
    }
}

impl AuditConfig {
    /// Load audit tags from environment variables.
    pub fn from_env() -> Self {
        Self {
            env_type: get_env_with_fallback_or("LANDING_ENV_TYPE", "ENV_TYPE", DEFAULT_ENV_TYPE),
            part: get_env_or("LANDING_PART", DEFAULT_PART),
        }
    }
}

/// 転送ヘッダー（x-forwarded-for）を信頼するか
///
/// `LANDING_TRUST_PROXY` が `true/1/yes/on` のときに有効化する。
pub fn is_trust_proxy_enabled() -> bool {
    get_env("LANDING_TRUST_PROXY")
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;
/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Listen port (`LANDING_PORT`, deprecated `PORT`)
pub fn get_port() -> u16 {
    get_env_with_fallback_parse("LANDING_PORT", "PORT", DEFAULT_PORT)
}

/// Bind address (`LANDING_HOST`)
///
/// `HOST` is never read; some shells export it with the machine name.
pub fn get_host() -> String {
    get_env_or("LANDING_HOST", DEFAULT_HOST)
}

/// 静的ファイルの配信ディレクトリ
pub fn get_static_dir() -> String {
    get_env_or("LANDING_STATIC_DIR", "public")
}
