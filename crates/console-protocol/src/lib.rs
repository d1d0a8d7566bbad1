//! Pure wire and log-entry types for the console bridge.
//!
//! This crate defines the entry types exchanged with the remote console
//! and the frame format broadcast to WebSocket subscribers. It contains
//! no I/O and no async code so every other crate can depend on it.

mod entry;
mod messages;

pub use entry::{EntryError, LogEntry, RawLogEntry};
pub use messages::FanoutMessage;
