//! Error types for log reconciliation and polling.

use console_api::ApiError;
use thiserror::Error;

/// Error type for the reconciler and the poll scheduler.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A fetched entry carried no timestamp. The remote is an older,
    /// incompatible build; retrying cannot resolve this, so polling
    /// stops permanently.
    #[error("the remote console is too old: its log entries carry no timestamps")]
    IncompatibleRemoteVersion,

    /// The tracked tail index ran past the end of the canonical log.
    /// This is a bug in the anchor/shift bookkeeping, never a remote
    /// condition.
    #[error("reconciler bookkeeping out of bounds: tracked tail {tracked} past last index {last}")]
    InvariantBroken {
        /// Where the bookkeeping believes the pre-merge tail now sits.
        tracked: usize,
        /// The actual last index of the canonical log.
        last: usize,
    },

    /// A remote API failure, transparently wrapped.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SyncError {
    /// Whether the scheduler must stop instead of retrying.
    pub fn is_fatal(&self) -> bool {
        match self {
            SyncError::IncompatibleRemoteVersion | SyncError::InvariantBroken { .. } => true,
            SyncError::Api(err) => err.is_fatal(),
        }
    }
}

/// Convenience Result alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatality_table() {
        assert!(SyncError::IncompatibleRemoteVersion.is_fatal());
        assert!(SyncError::InvariantBroken { tracked: 5, last: 3 }.is_fatal());
        assert!(SyncError::Api(ApiError::AuthInvalid).is_fatal());
        assert!(!SyncError::Api(ApiError::UnexpectedStatus { status: 500 }).is_fatal());
        assert!(!SyncError::Api(ApiError::Timeout { url: "u".into() }).is_fatal());
    }

    #[test]
    fn invariant_broken_display_names_both_indices() {
        let err = SyncError::InvariantBroken { tracked: 9, last: 7 };
        let display = format!("{err}");
        assert!(display.contains('9'));
        assert!(display.contains('7'));
    }
}
