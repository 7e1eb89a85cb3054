//! 監査ログミドルウェア
//!
//! レスポンス確定後にリクエスト1件につき1レコードを組み立て、
//! コンソールへ同期出力したうえで永続化を試行する。

use crate::audit::types::{
    format_reporting_time, format_response_time, AuditLogRecord, GeoHint, UNKNOWN,
};
use crate::common::ip::resolve_client_ip;
use crate::session::SessionContext;
use crate::AppState;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use http_body::Body as _;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{debug, info, warn};

/// コンソール出力のtarget
pub const AUDIT_TARGET: &str = "landing::audit";

/// レスポンスボディのバイト数（不明なら0）
fn response_length(response: &Response) -> u64 {
    response.body().size_hint().exact().unwrap_or_else(|| {
        response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    })
}

/// 監査ログミドルウェア
pub async fn audit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let url = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let remote_addr = resolve_client_ip(request.headers(), peer.as_ref(), state.trust_proxy);
    debug!(client_ip = %remote_addr, "Client IP resolved");

    let geo = GeoHint::from_headers(request.headers());
    let session_id = request
        .extensions()
        .get::<SessionContext>()
        .map(|ctx| ctx.session_id.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let response = next.run(request).await;

    let record = AuditLogRecord {
        date: format_reporting_time(Utc::now()),
        remote_addr,
        method,
        url,
        status: response.status().as_u16(),
        content_length: response_length(&response),
        user_agent,
        response_time: format_response_time(start.elapsed()),
        session_id,
        env_type: state.audit_config.env_type.clone(),
        latitude: geo.latitude,
        longitude: geo.longitude,
        city: geo.city,
        region: geo.region,
        country: geo.country,
        part: state.audit_config.part.clone(),
    };

    match serde_json::to_string(&record) {
        Ok(json) => info!(target: AUDIT_TARGET, record = %json, "request completed"),
        Err(e) => warn!("Failed to encode access log record: {}", e),
    }

    // 完了を待たない
    let _ = state.audit_writer.persist(record);

    response
}
