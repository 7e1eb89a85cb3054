//! データベースアクセス層
//!
//! 監査ログを格納するSQLiteストアへの接続と書き込み

/// 接続ライフサイクル管理
pub mod connection;

/// `logs` テーブル操作
pub mod logs;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;
