//! Bridge startup and wiring.

use std::net::SocketAddr;
use std::time::Duration;

use crate::operator;
use bridge_config::{Config, ConfigError};
use console_api::ConsoleClient;
use console_fanout::FanoutServer;
use console_sync::{PollScheduler, PollSchedulerConfig, RefreshNotifier};
use tracing::info;

/// Runs the bridge until the operator asks to exit.
///
/// Startup order matters: the first poll cycle runs inside
/// `scheduler.start()`, so a wrong URL or token aborts startup with a
/// clear error instead of failing silently in the background.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let url = config
        .console_url
        .clone()
        .ok_or(ConfigError::Missing("console_url"))?;
    let token = config
        .console_token
        .clone()
        .ok_or(ConfigError::Missing("console_token"))?;

    let client = ConsoleClient::connect(&url, token).await?;
    info!(base = %client.base_url(), "connected to remote console");

    let fanout = FanoutServer::new();
    let fanout_addr: SocketAddr = ([0, 0, 0, 0], config.fanout_port).into();
    fanout.start(fanout_addr).await?;

    let mut notifier = RefreshNotifier::new();
    // Pass new log lines through to stdout, like a local console.
    notifier.register(|appended| {
        for entry in appended {
            println!("{}", entry.text);
        }
    });
    let broadcast = fanout.clone();
    notifier.register(move |appended| broadcast.broadcast_update(appended));

    let scheduler = PollScheduler::new(
        client.clone(),
        notifier,
        PollSchedulerConfig {
            interval: Duration::from_millis(config.poll_interval_ms),
        },
    );
    scheduler.start().await?;
    info!(interval_ms = config.poll_interval_ms, "polling started");

    // Blocks until the operator types "exit" or stdin closes. Fatal
    // poll errors stop the scheduler but leave the fan-out server and
    // this loop running.
    operator::run(&client).await;

    scheduler.stop();
    info!("console bridge shut down");
    Ok(())
}
