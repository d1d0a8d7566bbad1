//! Configuration for the console bridge.
//!
//! Settings come from three sources, later ones winning: built-in
//! defaults, an optional JSON config file, and `BRIDGE_*` environment
//! variables. CLI flags are applied on top by the binary.

use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default delay between poll cycles, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default port for the WebSocket fan-out server.
pub const DEFAULT_FANOUT_PORT: u16 = 18535;

/// Main bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base URL of the remote console API. Scheme optional; without
    /// one, https is probed first with an http fallback.
    #[serde(default)]
    pub console_url: Option<String>,
    /// Opaque access token passed through to the remote console.
    #[serde(default)]
    pub console_token: Option<String>,
    /// Delay between the end of one poll cycle and the start of the next.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Port the WebSocket fan-out server listens on.
    #[serde(default = "default_fanout_port")]
    pub fanout_port: u16,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_fanout_port() -> u16 {
    DEFAULT_FANOUT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            console_url: None,
            console_token: None,
            poll_interval_ms: default_poll_interval_ms(),
            fanout_port: default_fanout_port(),
        }
    }
}

impl Config {
    /// Loads configuration from an optional file, then applies
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.load_from_env();
        Ok(config)
    }

    /// Loads configuration from a specific JSON file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Applies `BRIDGE_*` environment variable overrides.
    pub fn load_from_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("BRIDGE_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(url) = lookup("BRIDGE_CONSOLE_URL") {
            self.console_url = Some(url);
        }
        if let Some(token) = lookup("BRIDGE_CONSOLE_TOKEN") {
            self.console_token = Some(token);
        }
        if let Some(interval) = lookup("BRIDGE_POLL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.poll_interval_ms = ms;
            }
        }
        if let Some(port) = lookup("BRIDGE_FANOUT_PORT") {
            if let Ok(port) = port.parse() {
                self.fanout_port = port;
            }
        }
    }
}
