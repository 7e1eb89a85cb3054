//! 流量制限ミドルウェア
//!
//! 上限超過時は後段のハンドラーを呼ばずに429を返す。

use super::Admission;
use crate::common::ip::resolve_client_ip;
use crate::AppState;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;

/// 429レスポンスのメッセージ
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// 流量制限ミドルウェア
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = resolve_client_ip(request.headers(), peer.as_ref(), state.trust_proxy);

    match state.limiter.check(&client).await {
        Admission::Allowed => next.run(request).await,
        Admission::Rejected { retry_after } => too_many_requests(retry_after),
    }
}

/// 429レスポンスを組み立てる
pub fn too_many_requests(retry_after: Duration) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({
            "status": "error",
            "message": RATE_LIMIT_MESSAGE,
        })),
    )
        .into_response();

    // 端数は切り上げ、最低1秒
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(secs.max(1)));
    response
}
