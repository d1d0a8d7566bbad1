//! Configuration and logging setup for the console bridge.

mod config;
mod error;
mod logging;

pub use config::{
    Config, DEFAULT_FANOUT_PORT, DEFAULT_LOG_LEVEL, DEFAULT_POLL_INTERVAL_MS,
};
pub use error::{ConfigError, ConfigResult};
pub use logging::init_logging;
