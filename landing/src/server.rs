//! axumサーバー起動・シャットダウンハンドリング

use crate::common::error::{LandingError, LandingResult};
use crate::limiter::start_cleanup_task;
use crate::AppState;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// 指定アドレスで待ち受け、シャットダウンシグナルまでサーバーを動かす
pub async fn run(state: AppState, bind_addr: &str) -> LandingResult<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| LandingError::Server(format!("Failed to bind to {}: {}", bind_addr, e)))?;
    serve(listener, state, shutdown_signal()).await
}

/// 待ち受け済みのリスナーでサーバーを動かす
///
/// `shutdown` が完了すると処理中のリクエストを終えてから停止し、
/// その後データベース接続を閉じる。
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> LandingResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener
        .local_addr()
        .map_err(|e| LandingError::Server(format!("Failed to read local address: {}", e)))?;
    let db = state.db.clone();
    let cleanup = start_cleanup_task(state.limiter.clone());
    let app = crate::api::create_app(state);

    info!("Landing server listening on {}", local_addr);

    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await;

    cleanup.abort();
    db.close().await;

    result.map_err(|e| LandingError::Server(e.to_string()))?;
    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
