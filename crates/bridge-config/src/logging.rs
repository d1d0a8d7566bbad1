//! Logging initialization for the bridge.

use tracing_subscriber::EnvFilter;

/// Initializes tracing for the whole process.
///
/// Output goes to stderr so stdout stays free for the log pass-through.
/// `RUST_LOG` overrides the configured default level.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
