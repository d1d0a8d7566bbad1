//! The fetch seam between the scheduler and the transport.

use async_trait::async_trait;
use console_api::{ApiResult, ConsoleClient};
use console_protocol::RawLogEntry;

/// Source of remote log batches.
///
/// Abstracts the HTTP client so the scheduler can be driven by a
/// scripted source in tests. The production implementation is
/// [`ConsoleClient`].
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetches every entry strictly after the cursor. `None` asks for
    /// the log from the beginning.
    async fn fetch_since(&self, cursor: Option<i64>) -> ApiResult<Vec<RawLogEntry>>;
}

#[async_trait]
impl LogSource for ConsoleClient {
    async fn fetch_since(&self, cursor: Option<i64>) -> ApiResult<Vec<RawLogEntry>> {
        ConsoleClient::fetch_since(self, cursor).await
    }
}
