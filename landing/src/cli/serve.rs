//! serve サブコマンド
//!
//! ランディングページサーバーを起動します。

use crate::config::{get_host, get_port};
use clap::Args;

/// serve サブコマンドの引数
///
/// 未指定の値は環境変数（旧名を含む）から補完する。
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, env = "LANDING_PORT")]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long, env = "LANDING_HOST")]
    pub host: Option<String>,
}

impl ServeArgs {
    /// 待ち受けアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        let host = self.host.clone().unwrap_or_else(get_host);
        let port = self.port.unwrap_or_else(get_port);
        format!("{}:{}", host, port)
    }
}
