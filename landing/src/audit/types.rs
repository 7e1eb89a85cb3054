//! 監査ログレコードの型定義

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// エッジ由来のジオ情報が無い場合の値
pub const UNKNOWN: &str = "Unknown";

/// 集計タイムゾーン（Asia/Kolkata, UTC+05:30、夏時間なし）のオフセット秒
const REPORTING_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// エッジネットワークが付与するジオ情報ヘッダー
pub mod geo_headers {
    /// 緯度
    pub const LATITUDE: &str = "cf-iplatitude";
    /// 経度
    pub const LONGITUDE: &str = "cf-iplongitude";
    /// 都市
    pub const CITY: &str = "cf-ipcity";
    /// 地域
    pub const REGION: &str = "cf-region";
    /// 国
    pub const COUNTRY: &str = "cf-ipcountry";
}

/// 1リクエスト/レスポンスの監査ログレコード
///
/// 生成後は変更しない。永続化は最大1回、読み戻しはしない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRecord {
    /// 集計タイムゾーンでの日時（`dd/mm/yyyy, h:mm:ss am`）
    pub date: String,
    /// クライアントアドレス
    pub remote_addr: String,
    /// HTTPメソッド
    pub method: String,
    /// パス（クエリ含む）
    pub url: String,
    /// HTTPステータスコード
    pub status: u16,
    /// レスポンスボディのバイト数
    pub content_length: u64,
    /// User-Agent
    pub user_agent: Option<String>,
    /// 処理時間（`12.345 ms`）
    pub response_time: String,
    /// セッション識別子
    pub session_id: String,
    /// デプロイ環境タグ
    pub env_type: String,
    /// 緯度
    pub latitude: String,
    /// 経度
    pub longitude: String,
    /// 都市
    pub city: String,
    /// 地域
    pub region: String,
    /// 国
    pub country: String,
    /// 記録元の分類タグ
    pub part: String,
}

/// エッジネットワーク由来のジオ情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoHint {
    /// 緯度
    pub latitude: String,
    /// 経度
    pub longitude: String,
    /// 都市
    pub city: String,
    /// 地域
    pub region: String,
    /// 国
    pub country: String,
}

impl GeoHint {
    /// 信頼できる上流ヘッダーから取得する（欠損は `Unknown`）
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Self {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string()
        };
        Self {
            latitude: get(geo_headers::LATITUDE),
            longitude: get(geo_headers::LONGITUDE),
            city: get(geo_headers::CITY),
            region: get(geo_headers::REGION),
            country: get(geo_headers::COUNTRY),
        }
    }
}

/// 集計タイムゾーンで日時を整形する
pub fn format_reporting_time(at: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(REPORTING_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    at.with_timezone(&offset)
        .format("%d/%m/%Y, %-I:%M:%S %P")
        .to_string()
}

/// 処理時間をミリ秒（小数3桁）で整形する
pub fn format_response_time(elapsed: Duration) -> String {
    format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0)
}
