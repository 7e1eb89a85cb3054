//! CLI module for the landing server
//!
//! Running without a subcommand starts the server using environment settings.

pub mod serve;

use clap::{Parser, Subcommand};

/// Landing page server for kivtechs.cloud
#[derive(Parser, Debug)]
#[command(name = "landing")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    LANDING_DATABASE_URL           SQLite URL of the data directory (required)
    LANDING_DATABASE_NAME          Database name inside the data directory (required)
    LANDING_HOST                   Bind address (default: 0.0.0.0)
    LANDING_PORT                   Listen port (default: 3000)
    LANDING_ENV_TYPE               Environment tag in access logs (default: DEVELOPMENT)
    LANDING_PART                   Classification tag in access logs (default: LANDING PAGE PART)
    LANDING_RATE_LIMIT_MAX         Requests per client per window (default: 100)
    LANDING_RATE_LIMIT_WINDOW_SECS Rate limit window in seconds (default: 900)
    LANDING_TRUST_PROXY            Trust x-forwarded-for for client addresses
    LANDING_STATIC_DIR             Static file directory (default: public)
    LANDING_LOG_LEVEL              Log level (default: info)
    LANDING_LOG_FORMAT             text or json (default: text)
    LANDING_LOG_DIR                Also write daily-rotated logs to this directory
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the landing page server
    Serve(serve::ServeArgs),
}
