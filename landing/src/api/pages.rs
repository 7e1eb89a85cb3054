//! ページハンドラー

use crate::api::error::AppError;
use crate::session::SessionContext;
use crate::web::PageView;
use crate::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::Html,
};

/// ページ定義
#[derive(Debug, Clone, Copy)]
pub struct Page {
    /// ルートパス
    pub path: &'static str,
    /// ナビゲーションで強調する項目
    pub active_page: &'static str,
    /// 本文テンプレートのID
    pub content_file: &'static str,
    /// ページタイトル
    pub title: &'static str,
}

/// 公開ページ一覧
pub const PAGES: &[Page] = &[
    Page {
        path: "/",
        active_page: "main",
        content_file: "guest/landingpage",
        title: "Home - kivtechs.cloud",
    },
    Page {
        path: "/terms",
        active_page: "tandc",
        content_file: "guest/tandc",
        title: "Terms & Conditions - kivtechs.cloud",
    },
    Page {
        path: "/privacy",
        active_page: "privacypolicy",
        content_file: "guest/privacypolicy",
        title: "Privacy Policy - kivtechs.cloud",
    },
    Page {
        path: "/aimodels",
        active_page: "aimodels",
        content_file: "guest/aimodels",
        title: "AI Models - kivtechs.cloud",
    },
    Page {
        path: "/aiproducts",
        active_page: "aiproducts",
        content_file: "guest/aiproducts",
        title: "AI Products - kivtechs.cloud",
    },
    Page {
        path: "/support",
        active_page: "support",
        content_file: "guest/support",
        title: "Support - kivtechs.cloud",
    },
    Page {
        path: "/pricing",
        active_page: "Pricing",
        content_file: "guest/pricing",
        title: "Pricing & Plans - kivtechs.cloud",
    },
];

/// ページをレンダリングする
pub fn render_page(
    state: &AppState,
    session: &SessionContext,
    page: &Page,
) -> Result<Html<String>, AppError> {
    let html = state.renderer.render_page(&PageView {
        active_page: page.active_page,
        content_file: page.content_file,
        page_title: page.title,
        session_id: session.session_id.as_str(),
    })?;
    Ok(Html(html))
}

/// 404ページ
///
/// ルートにも静的ファイルにも一致しなかったリクエストを受け取る。
pub async fn not_found(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<(StatusCode, Html<String>), AppError> {
    let requested = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let html = state.renderer.render_not_found(requested)?;
    Ok((StatusCode::NOT_FOUND, Html(html)))
}
