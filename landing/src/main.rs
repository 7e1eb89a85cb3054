//! Landing page server entry point

use clap::Parser;
use landing::cli::{serve::ServeArgs, Cli, Commands};
use landing::common::error::LandingResult;
use landing::config::{
    get_static_dir, is_trust_proxy_enabled, AuditConfig, DatabaseConfig, RateLimitConfig,
};
use landing::db::connection::DatabaseConnection;
use landing::{logging, server, AppState};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // .env は任意
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let args = match cli.command {
        Some(Commands::Serve(args)) => args,
        None => ServeArgs::default(),
    };

    if let Err(e) = run_server(args).await {
        if e.is_fatal_at_startup() {
            error!("Startup aborted: {}", e);
        } else {
            error!("Server stopped: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run_server(args: ServeArgs) -> LandingResult<()> {
    info!(
        "Landing server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let db = Arc::new(DatabaseConnection::new(DatabaseConfig::from_env()));
    // 接続できなければ待ち受けを開始しない
    db.connect().await?;

    let state = AppState::new(
        db,
        AuditConfig::from_env(),
        RateLimitConfig::from_env(),
        is_trust_proxy_enabled(),
        get_static_dir().into(),
    )?;

    server::run(state, &args.bind_addr()).await
}
