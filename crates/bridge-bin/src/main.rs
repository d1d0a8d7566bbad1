//! Console Bridge - tails a remote server web console and rebroadcasts
//! new log lines to WebSocket subscribers.

mod app;
mod operator;

use std::path::PathBuf;

use bridge_config::{init_logging, Config};
use clap::Parser;

/// Console bridge command-line interface.
#[derive(Parser)]
#[command(name = "console-bridge")]
#[command(about = "Tails a remote server web console and rebroadcasts new log lines")]
#[command(version)]
struct Cli {
    /// Base URL of the remote console API (scheme optional)
    #[arg(long)]
    url: Option<String>,

    /// Access token for the remote console
    #[arg(long)]
    token: Option<String>,

    /// Delay between poll cycles, in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Port for the WebSocket fan-out server
    #[arg(long)]
    fanout_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Defaults < config file < environment < CLI flags.
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.console_url = Some(url);
    }
    if let Some(token) = cli.token {
        config.console_token = Some(token);
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.poll_interval_ms = interval_ms;
    }
    if let Some(port) = cli.fanout_port {
        config.fanout_port = port;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_logging(&config.log_level);

    app::run(config).await
}
