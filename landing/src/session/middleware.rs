//! セッション識別子割り当てミドルウェア
//!
//! Cookieから識別子を読み取り、無い・不正な場合は新規発行してSet-Cookieを付与する。
//! 解決した識別子は `SessionContext` としてrequest extensionsに格納する。

use super::{
    build_session_cookie, extract_session_cookie, is_request_secure, SessionContext, SessionId,
};
use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

/// リクエストからセッションを解決する
pub fn resolve_session(request: &Request<Body>) -> SessionContext {
    match extract_session_cookie(request.headers()) {
        Some(raw) => match SessionId::parse(&raw) {
            Some(session_id) => SessionContext {
                session_id,
                is_new: false,
            },
            None => {
                debug!("Malformed session cookie, issuing a new identifier");
                SessionContext {
                    session_id: SessionId::generate(),
                    is_new: true,
                }
            }
        },
        None => SessionContext {
            session_id: SessionId::generate(),
            is_new: true,
        },
    }
}

/// セッション識別子割り当てミドルウェア
pub async fn session_middleware(mut request: Request<Body>, next: Next) -> Response {
    let context = resolve_session(&request);
    let secure = is_request_secure(request.headers());
    request.extensions_mut().insert(context.clone());

    let mut response = next.run(request).await;

    if context.is_new {
        let cookie = build_session_cookie(&context.session_id, secure);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Failed to build session cookie header: {}", e),
        }
    }

    response
}
