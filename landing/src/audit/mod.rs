//! 監査ログシステム
//!
//! リクエスト/レスポンス1往復ごとにレコードを組み立て、
//! コンソールへ出力し、ストアが準備済みなら非同期に永続化する。

/// 監査ログの型定義
pub mod types;

/// 非同期永続化ライター
pub mod writer;

/// 監査ログミドルウェア
pub mod middleware;
