//! Configuration error types.

use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for the expected schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required setting is missing after file, environment, and CLI
    /// sources were applied.
    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

/// Convenience Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
