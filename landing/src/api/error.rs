//! HTTPエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::LandingError;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub LandingError);

impl From<LandingError> for AppError {
    fn from(err: LandingError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // 詳細はログのみ。クライアントには汎用メッセージを返す
        error!(error = %self.0, "Request failed");
        let status = self.0.status_code();
        let body = format!(
            "<!DOCTYPE html><html><head><title>{0}</title></head><body><h1>{0}</h1></body></html>",
            self.0.external_message()
        );
        (status, Html(body)).into_response()
    }
}
