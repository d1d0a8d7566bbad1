//! HTTP client for the remote console API.
//!
//! Wraps the remote's two endpoints behind [`ConsoleClient`]:
//!
//! - `terminal_log` — cursor-based log fetch, consumed by the poll
//!   scheduler in `console-sync`.
//! - `execute` — operator command dispatch, fire-and-forget.
//!
//! Failures are classified into [`ApiError`], whose
//! [`is_fatal`](ApiError::is_fatal) split drives the scheduler's
//! retry-vs-stop policy.

mod client;
mod error;
mod negotiate;

pub use client::ConsoleClient;
pub use error::{ApiError, ApiResult};
pub use negotiate::negotiate_base_url;
