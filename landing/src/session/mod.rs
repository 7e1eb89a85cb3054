//! 訪問者セッション識別子
//!
//! 訪問者ごとにUUIDv7の不透明な識別子をCookieで保持させる。
//! 識別子は認証・認可の意味を持たず、リクエストの相関にのみ使用する。

/// セッション識別子割り当てミドルウェア
pub mod middleware;

use axum::http::{header, HeaderMap};
use serde::Serialize;
use uuid::Uuid;

/// セッションCookie名
pub const SESSION_COOKIE: &str = "visitor_id";

/// セッションCookieの有効期間（1年）
pub const SESSION_COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// 不透明なセッション識別子
///
/// 時刻順に並ぶUUIDv7を小文字ハイフン区切りで保持する。生成後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// 新しい識別子を生成する（失敗しない）
    pub fn generate() -> Self {
        Self(Uuid::now_v7().hyphenated().to_string())
    }

    /// Cookie値を検証して識別子に変換する
    ///
    /// 小文字ハイフン区切りのUUIDv7以外は `None`。
    /// 大文字・ハイフン無し・波括弧・`urn:uuid:` 形式も不正として扱う。
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let uuid = Uuid::try_parse(value).ok()?;
        if uuid.get_version_num() != 7 {
            return None;
        }
        let canonical = uuid.hyphenated().to_string();
        if canonical != value {
            return None;
        }
        Some(Self(canonical))
    }

    /// 文字列表現
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// リクエストスコープのセッション情報
///
/// ミドルウェアがrequest extensionsに格納し、後段は `Extension<SessionContext>` で読む。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// 解決済みの識別子
    pub session_id: SessionId,
    /// このリクエストで新規発行したか
    pub is_new: bool,
}

/// CookieヘッダーからセッションCookieの値を取り出す
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    for cookie_header in headers.get_all(header::COOKIE) {
        let Ok(cookie_header) = cookie_header.to_str() else {
            continue;
        };
        for part in cookie_header.split(';') {
            let trimmed = part.trim();
            if let Some(value) = trimmed.strip_prefix(&format!("{}=", SESSION_COOKIE)) {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// セッションCookieのSet-Cookieヘッダー値を生成
pub fn build_session_cookie(session_id: &SessionId, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, session_id, SESSION_COOKIE_MAX_AGE_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// HTTPS経由のリクエストか（リバースプロキシのヘッダーで判定）
pub fn is_request_secure(headers: &HeaderMap) -> bool {
    if let Some(proto) = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
    {
        if proto.eq_ignore_ascii_case("https") {
            return true;
        }
    }
    if let Some(forwarded) = headers
        .get("forwarded")
        .and_then(|value| value.to_str().ok())
    {
        if forwarded.to_ascii_lowercase().contains("proto=https") {
            return true;
        }
    }
    false
}
