//! jwrap CLI - JSON/JSONP endpoint over a registered target.

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod demo;
pub(crate) mod shared;

/// jwrap - expose a target's methods as a JSON/JSONP endpoint.
#[derive(Debug, Parser)]
#[command(name = "jwrap", version, about)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP endpoint.
    Serve(commands::serve::ServeArgs),
    /// Print the method catalog.
    Methods(commands::methods::MethodsArgs),
    /// Run a single request through the dispatch core.
    Call(commands::call::CallArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = jwrap_config::load_config(cli.config.as_deref())?;

    // Initialize tracing; logs go to stderr so `call` output stays clean.
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    };

    tracing::debug!("jwrap starting with config: {:?}", cli.config);

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Methods(args) => commands::methods::execute(args, &config),
        Commands::Call(args) => commands::call::execute(args, &config),
    }
}
