//! Fan-out server error types.

use thiserror::Error;

/// Error type for the fan-out server.
#[derive(Debug, Error)]
pub enum FanoutError {
    /// Failed to bind or accept on the listener socket.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket handshake or framing error on a subscriber connection.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Convenience Result alias for fan-out operations.
pub type FanoutResult<T> = Result<T, FanoutError>;
