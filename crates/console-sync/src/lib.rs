//! Canonical log reconciliation and the poll loop driving it.
//!
//! This crate is the core of the console bridge:
//!
//! - [`LogReconciler`] owns the canonical, time-sorted log and folds
//!   each fetched batch into it with a localized, idempotent merge,
//!   reporting only the genuinely new tail suffix.
//! - [`PollScheduler`] drives fetch → merge → notify at a fixed
//!   interval, one cycle at a time, with a retry-vs-stop error policy.
//! - [`RefreshNotifier`] fans each cycle's suffix out to registered
//!   observers in order.
//!
//! ```text
//! ┌───────────┐    ┌───────────────┐    ┌─────────────────┐
//! │ LogSource │───▶│ LogReconciler │───▶│ RefreshNotifier │
//! │ (HTTP)    │    │ (canonical)   │    │ (observers)     │
//! └───────────┘    └───────────────┘    └─────────────────┘
//!        ▲ PollScheduler: one sequential cycle per interval
//! ```

mod error;
mod notifier;
mod reconciler;
mod scheduler;
mod source;

pub use error::{SyncError, SyncResult};
pub use notifier::{RefreshNotifier, RefreshObserver};
pub use reconciler::{locate_insertion_anchor, LogReconciler};
pub use scheduler::{PollScheduler, PollSchedulerConfig};
pub use source::LogSource;
