//! `jwrap serve` command.
//!
//! Starts the HTTP endpoint over the demo target.

use clap::Args;

use jwrap_config::JwrapConfig;
use jwrap_transport_http::HttpServer;

use crate::shared;

/// Start the HTTP endpoint.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind address (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port (overrides `server.port`).
    #[arg(long)]
    pub port: Option<u16>,
    /// Endpoint route (overrides `server.path`).
    #[arg(long)]
    pub path: Option<String>,
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &JwrapConfig) -> anyhow::Result<()> {
    let state = shared::demo_state(config)?;
    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let path = args.path.as_deref().unwrap_or(&config.server.path);

    let server = HttpServer::new(state, host, port, path)?;
    tokio::select! {
        result = server.run() => {
            result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
