//! Fixed-interval poll scheduler.
//!
//! Drives fetch → merge → notify as one strictly sequential timeline:
//! no cycle begins before the previous one's notifications have fired,
//! and the interval is measured from the end of one cycle to the start
//! of the next. `stop()` only prevents the next cycle; a cycle already
//! in flight completes.

use crate::error::{SyncError, SyncResult};
use crate::notifier::RefreshNotifier;
use crate::reconciler::LogReconciler;
use crate::source::LogSource;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

/// Scheduler cadence configuration.
#[derive(Debug, Clone)]
pub struct PollSchedulerConfig {
    /// Delay between the end of one cycle and the start of the next.
    pub interval: Duration,
}

impl Default for PollSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
        }
    }
}

struct Inner<S> {
    source: S,
    // Cycles are strictly sequential; the mutex also keeps any future
    // out-of-band reader from observing a half-merged log.
    reconciler: Mutex<LogReconciler>,
    notifier: RefreshNotifier,
    interval: Duration,
    running: AtomicBool,
    // Bumped on every start. A loop spawned by an earlier start sees
    // the mismatch and exits instead of racing the new loop when a
    // stop/start pair lands within one interval.
    epoch: AtomicU64,
}

/// Poll scheduler: `Stopped → Running → Stopped`.
///
/// Cloning shares the same scheduler; clones see the same state.
pub struct PollScheduler<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for PollScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: LogSource + 'static> PollScheduler<S> {
    /// Creates a stopped scheduler. Observers must already be
    /// registered on the notifier; registration after start is not
    /// supported.
    pub fn new(source: S, notifier: RefreshNotifier, config: PollSchedulerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                reconciler: Mutex::new(LogReconciler::new()),
                notifier,
                interval: config.interval,
                running: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    /// Whether the periodic cadence is active.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// Starts polling. A no-op when already running.
    ///
    /// The first cycle runs inline before the periodic task is spawned,
    /// so a misconfigured URL or token fails the caller immediately
    /// instead of a background task. On any first-cycle error the
    /// scheduler is left stopped and the error is returned.
    pub async fn start(&self) -> SyncResult<()> {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            debug!("poll scheduler already running");
            return Ok(());
        }
        let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        if let Err(err) = self.inner.run_cycle().await {
            self.inner.running.store(false, Ordering::SeqCst);
            return Err(err);
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            loop {
                sleep(inner.interval).await;
                if !inner.running.load(Ordering::SeqCst)
                    || inner.epoch.load(Ordering::SeqCst) != epoch
                {
                    break;
                }
                match inner.run_cycle().await {
                    Ok(()) => {}
                    Err(err) if err.is_fatal() => {
                        error!(error = %err, "console polling stopped");
                        inner.running.store(false, Ordering::SeqCst);
                        break;
                    }
                    Err(err) => {
                        warn!(error = %err, "console poll cycle failed, retrying next interval");
                    }
                }
            }
        });
        Ok(())
    }

    /// Stops scheduling future cycles. A cycle already in flight
    /// completes, including its notifications. Restart is supported.
    pub fn stop(&self) {
        if self.inner.running.swap(false, Ordering::SeqCst) {
            info!("poll scheduler stopped");
        }
    }

    /// Snapshot of the canonical log length, for diagnostics.
    pub async fn log_len(&self) -> usize {
        self.inner.reconciler.lock().await.len()
    }
}

impl<S: LogSource> Inner<S> {
    async fn run_cycle(&self) -> SyncResult<()> {
        // Snapshot the cursor and release the lock before the network
        // call so readers never stall behind an in-flight fetch. Cycles
        // are strictly sequential, so the cursor cannot move between
        // the snapshot and the merge below.
        let cursor = self.reconciler.lock().await.cursor();
        let batch = self.source.fetch_since(cursor).await?;
        let fetched = batch.len();

        let mut reconciler = self.reconciler.lock().await;
        let appended = reconciler.merge(batch)?;
        debug!(fetched, appended = appended.len(), "poll cycle complete");
        self.notifier.notify(&appended);
        Ok(())
    }
}
