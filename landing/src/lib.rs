//! Landing page server
//!
//! マーケティング用ページを配信し、訪問者ごとのセッション識別子と
//! リクエスト単位の監査ログを管理するWebサーバー

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// HTTPルーティングとページハンドラー
pub mod api;

/// 監査ログシステム
pub mod audit;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// クライアント単位の流量制限
pub mod limiter;

/// ロギング初期化ユーティリティ
pub mod logging;

/// HTTPサーバー起動とシャットダウン
pub mod server;

/// 訪問者セッション識別子
pub mod session;

/// テンプレートレンダリング
pub mod web;

use std::path::PathBuf;
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// バックエンドストアへの接続ガード
    pub db: Arc<db::connection::DatabaseConnection>,
    /// 監査ログライター
    pub audit_writer: audit::writer::AuditLogWriter,
    /// 監査レコードに埋め込むデプロイ情報
    pub audit_config: Arc<config::AuditConfig>,
    /// 流量制限
    pub limiter: Arc<limiter::FixedWindowLimiter>,
    /// テンプレートレンダラー
    pub renderer: Arc<web::PageRenderer>,
    /// 転送ヘッダーを信頼するか
    pub trust_proxy: bool,
    /// 静的ファイルの配信ディレクトリ
    pub static_dir: PathBuf,
}

impl AppState {
    /// 接続ガードを永続化先として状態を組み立てる
    pub fn new(
        db: Arc<db::connection::DatabaseConnection>,
        audit_config: config::AuditConfig,
        rate_limit: config::RateLimitConfig,
        trust_proxy: bool,
        static_dir: PathBuf,
    ) -> common::error::LandingResult<Self> {
        let audit_writer = audit::writer::AuditLogWriter::new(db.clone());
        Ok(Self {
            db,
            audit_writer,
            audit_config: Arc::new(audit_config),
            limiter: Arc::new(limiter::FixedWindowLimiter::new(rate_limit)),
            renderer: Arc::new(web::PageRenderer::new()?),
            trust_proxy,
            static_dir,
        })
    }
}
