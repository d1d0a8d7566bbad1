//! Frames broadcast to WebSocket subscribers.

use crate::LogEntry;
use serde::{Deserialize, Serialize};

/// A frame sent to every connected subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FanoutMessage {
    /// New entries were appended to the tail of the canonical log.
    ConsoleUpdate {
        /// The appended suffix, in canonical order.
        data: Vec<LogEntry>,
    },
}
