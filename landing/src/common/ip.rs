//! クライアントIPアドレス解決ユーティリティ
//!
//! IPv4-mapped IPv6アドレスをIPv4に正規化し、
//! プロキシ信頼設定に応じてヘッダーまたはソケットアドレスからIPを決定する。

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// アドレスを解決できなかったクライアントのキー
pub const UNKNOWN_CLIENT: &str = "unknown";

/// IPアドレスを正規化する
///
/// IPv4-mapped IPv6（::ffff:x.x.x.x）をIPv4に変換。
/// それ以外はそのまま返す。
pub fn normalize_ip(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                IpAddr::V4(v4)
            } else {
                IpAddr::V6(v6)
            }
        }
        v4 => v4,
    }
}

/// SocketAddrからIPアドレスを抽出し正規化する
pub fn normalize_socket_ip(addr: &SocketAddr) -> IpAddr {
    normalize_ip(addr.ip())
}

/// `x-forwarded-for` の先頭ホップ、なければ `x-real-ip` を返す
pub fn forwarded_client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
        .filter(|s| !s.is_empty())
}

/// リクエストのクライアントアドレスを決定する
///
/// `trust_proxy` が有効な場合のみ転送ヘッダーを信頼する。
/// ヘッダー値がIPとして解釈できればソケットアドレスと同様に正規化する。
pub fn resolve_client_ip(
    headers: &HeaderMap,
    peer: Option<&SocketAddr>,
    trust_proxy: bool,
) -> String {
    if trust_proxy {
        if let Some(forwarded) = forwarded_client_ip(headers) {
            return match forwarded.parse::<IpAddr>() {
                Ok(ip) => normalize_ip(ip).to_string(),
                Err(_) => forwarded,
            };
        }
    }
    peer.map(|addr| normalize_socket_ip(addr).to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
