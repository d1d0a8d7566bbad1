//! WebSocket fan-out for the console bridge.
//!
//! [`FanoutServer`] broadcasts each non-empty appended log suffix as a
//! `console_update` frame to every connected subscriber. It runs its
//! own accept and per-connection tasks and never blocks the poll path.

mod error;
mod server;

pub use error::{FanoutError, FanoutResult};
pub use server::FanoutServer;
