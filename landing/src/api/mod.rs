//! HTTPルーティング
//!
//! ミドルウェアは外側から セッション → 監査ログ → 流量制限 の順に適用する。
//! 監査ログが流量制限を包むため、429も記録される。

/// HTTPエラーレスポンス
pub mod error;

/// ページハンドラー
pub mod pages;

use crate::audit::middleware::audit_middleware;
use crate::limiter::middleware::rate_limit_middleware;
use crate::session::{middleware::session_middleware, SessionContext};
use crate::AppState;
use axum::{
    extract::State,
    handler::Handler,
    middleware,
    routing::get,
    Extension, Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// アプリケーションのルーターを構築する
pub fn create_app(state: AppState) -> Router {
    let mut router = Router::new();
    for page in pages::PAGES {
        router = router.route(
            page.path,
            get(
                move |State(state): State<AppState>,
                      Extension(session): Extension<SessionContext>| async move {
                    pages::render_page(&state, &session, page)
                },
            ),
        );
    }

    let static_files = ServeDir::new(&state.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(pages::not_found.with_state(state.clone()));

    router
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(middleware::from_fn(session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
