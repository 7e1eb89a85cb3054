//! 共通ユーティリティ

/// エラー型
pub mod error;

/// クライアントIP解決
pub mod ip;
