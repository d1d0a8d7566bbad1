//! Canonical log reconciliation.
//!
//! The remote's batches overlap, arrive unordered, and repeat entries
//! whenever its paging or retry behavior misfires. [`LogReconciler`]
//! owns the one canonical, time-sorted copy of the log and folds each
//! batch into it with a localized merge anchored near the tail: the
//! common case (entries genuinely new) costs a short backward scan and
//! a few appends, while late-arriving historical entries are still
//! absorbed at the right position. A full re-sort per poll would grow
//! without bound with the log; this stays proportional to the batch.

use crate::error::{SyncError, SyncResult};
use console_protocol::{LogEntry, RawLogEntry};
use std::collections::VecDeque;

/// Owner of the canonical log.
///
/// The log starts empty, grows monotonically for the life of the
/// process, and is never persisted. No other component mutates it;
/// downstream consumers only ever see the appended suffix returned by
/// [`merge`](Self::merge).
#[derive(Debug, Default)]
pub struct LogReconciler {
    entries: Vec<LogEntry>,
}

impl LogReconciler {
    /// Creates a reconciler with an empty canonical log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical log, ascending by time.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of canonical entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the canonical log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fetch cursor: id of the last canonical entry, `None` while
    /// the log is empty.
    pub fn cursor(&self) -> Option<i64> {
        self.entries.last().map(|entry| entry.id)
    }

    /// Merges one fetched batch into the canonical log and returns the
    /// appended suffix: the run of entries at the tail that is new as a
    /// result of this merge.
    ///
    /// Entries inserted strictly before the pre-merge tail (backfill)
    /// mutate the log but are not part of the suffix — only genuine
    /// forward growth is surfaced.
    ///
    /// # Errors
    ///
    /// - [`SyncError::IncompatibleRemoteVersion`] if any batch entry
    ///   lacks a timestamp. The canonical log is left untouched.
    /// - [`SyncError::InvariantBroken`] if the tail bookkeeping runs
    ///   out of bounds. Must never happen.
    pub fn merge(&mut self, batch: Vec<RawLogEntry>) -> SyncResult<Vec<LogEntry>> {
        // Validate the whole batch before touching the canonical log.
        let mut batch: Vec<LogEntry> = batch
            .into_iter()
            .map(LogEntry::try_from)
            .collect::<Result<_, _>>()
            .map_err(|_| SyncError::IncompatibleRemoteVersion)?;

        if batch.is_empty() {
            return Ok(Vec::new());
        }

        // Stable sort: the remote's batch order breaks timestamp ties.
        batch.sort_by(|a, b| a.time.total_cmp(&b.time));

        if self.entries.is_empty() {
            self.entries = batch;
            return Ok(self.entries.clone());
        }

        // Index of the entry that was last before this merge began.
        // Shifted whenever an insert lands at or before it.
        let mut tracked_tail = self.entries.len() - 1;

        let mut anchor = locate_insertion_anchor(&self.entries, batch[0].time);
        let mut pending: VecDeque<LogEntry> = batch.into();

        while let Some(entry) = pending.pop_front() {
            // Exact (time, text) duplicate of the entry at the anchor:
            // already present, discard without insertion.
            let duplicate = anchor.is_some_and(|at| {
                let prior = &self.entries[at];
                prior.time == entry.time && prior.text == entry.text
            });

            if !duplicate {
                let at = anchor.map_or(0, |a| a + 1);
                if at <= tracked_tail {
                    tracked_tail += 1;
                }
                self.entries.insert(at, entry);
            }

            // Re-establish the anchor for the next batch entry without
            // re-scanning from the tail. The just-inserted entry sorts
            // at or before the next one, so the forward walk passes it.
            if let Some(next) = pending.front() {
                anchor = advance_anchor(&self.entries, anchor, next.time);
            }
        }

        let last = self.entries.len() - 1;
        if tracked_tail > last {
            return Err(SyncError::InvariantBroken {
                tracked: tracked_tail,
                last,
            });
        }
        if tracked_tail == last {
            // Pure backfill: the log changed but nothing extends past
            // the pre-merge tail.
            Ok(Vec::new())
        } else {
            Ok(self.entries[tracked_tail + 1..].to_vec())
        }
    }
}

/// Finds the insertion anchor for a batch whose first entry has the
/// given timestamp: the last position whose time is `<=` it, scanning
/// backward from the tail (new entries usually belong there). `None`
/// means the entry belongs before index 0.
pub fn locate_insertion_anchor(entries: &[LogEntry], time: f64) -> Option<usize> {
    entries.iter().rposition(|entry| time >= entry.time)
}

/// Walks the anchor forward to the last position whose time is `<=`
/// the next batch entry's timestamp. Starts at the current anchor, so
/// the cost is bounded by how far the new entry actually moved.
fn advance_anchor(entries: &[LogEntry], anchor: Option<usize>, time: f64) -> Option<usize> {
    let mut current = anchor;
    let mut next = anchor.map_or(0, |a| a + 1);
    while next < entries.len() && time >= entries[next].time {
        current = Some(next);
        next += 1;
    }
    current
}
