//! Deferred progress write-back (PRD-09).
//!
//! Dashboard sessions report progress snapshots far more often than they
//! need to be persisted. [`SyncQueue`] coalesces them per user and
//! [`SyncService`] writes each user's latest snapshot once it has been
//! quiet for the configured debounce interval. Queued snapshots from a
//! session that never finished its initial load are dropped; a
//! zero-initialized client must never overwrite stored progress.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use studyquest_core::types::DbId;
use studyquest_db::models::user::SyncUpdate;
use studyquest_db::repositories::UserRepo;
use studyquest_db::DbPool;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// How often the writer scans the pending map.
const SWEEP_INTERVAL: Duration = Duration::from_millis(200);

/// A snapshot waiting out its quiet interval.
#[derive(Debug, Clone)]
struct Pending {
    update: SyncUpdate,
    queued_at: Instant,
}

#[derive(Debug, Default)]
struct QueueInner {
    /// Users whose initial progress load completed in this process.
    loaded: HashSet<DbId>,
    /// Latest snapshot per user; each overwrite restarts the quiet timer.
    pending: HashMap<DbId, Pending>,
}

/// Per-user snapshot queue shared between request handlers and the writer.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
#[derive(Debug, Default)]
pub struct SyncQueue {
    inner: RwLock<QueueInner>,
}

impl SyncQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the user's initial progress load completed.
    pub async fn mark_loaded(&self, user_id: DbId) {
        self.inner.write().await.loaded.insert(user_id);
    }

    /// Queue a snapshot, replacing any pending one and restarting the
    /// user's quiet timer.
    ///
    /// Returns `false` when the user has not completed a progress load in
    /// this process; the snapshot is dropped with a warning because it
    /// may carry a client's zeroed initial state.
    pub async fn enqueue(&self, user_id: DbId, update: SyncUpdate) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.loaded.contains(&user_id) {
            tracing::warn!(user_id, "Dropping sync snapshot queued before initial load");
            return false;
        }
        inner.pending.insert(
            user_id,
            Pending {
                update,
                queued_at: Instant::now(),
            },
        );
        true
    }

    /// Number of snapshots currently waiting.
    pub async fn pending_count(&self) -> usize {
        self.inner.read().await.pending.len()
    }

    /// Remove and return every snapshot quiet for at least `debounce`.
    async fn take_quiet(&self, debounce: Duration) -> Vec<(DbId, SyncUpdate)> {
        let now = Instant::now();
        let mut inner = self.inner.write().await;
        let due: Vec<DbId> = inner
            .pending
            .iter()
            .filter(|(_, p)| now.duration_since(p.queued_at) >= debounce)
            .map(|(id, _)| *id)
            .collect();
        due.into_iter()
            .filter_map(|id| inner.pending.remove(&id).map(|p| (id, p.update)))
            .collect()
    }

    /// Remove and return every snapshot, ignoring timers. Shutdown path.
    async fn take_all(&self) -> Vec<(DbId, SyncUpdate)> {
        self.inner
            .write()
            .await
            .pending
            .drain()
            .map(|(id, p)| (id, p.update))
            .collect()
    }
}

/// Background writer for queued progress snapshots.
///
/// A single long-lived Tokio task that sweeps the queue on a short
/// interval and persists each snapshot once its quiet interval elapsed.
/// On cancellation it flushes everything still pending before exiting.
pub struct SyncService {
    pool: DbPool,
    queue: Arc<SyncQueue>,
    debounce: Duration,
}

impl SyncService {
    /// Create a new writer over the shared queue.
    pub fn new(pool: DbPool, queue: Arc<SyncQueue>, debounce_ms: u64) -> Self {
        Self {
            pool,
            queue,
            debounce: Duration::from_millis(debounce_ms),
        }
    }

    /// Run the writer loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        tracing::info!(
            debounce_ms = self.debounce.as_millis() as u64,
            "Sync writer started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    let remaining = self.queue.take_all().await;
                    let count = remaining.len();
                    self.write_snapshots(remaining).await;
                    tracing::info!(flushed = count, "Sync writer shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let due = self.queue.take_quiet(self.debounce).await;
                    self.write_snapshots(due).await;
                }
            }
        }
    }

    /// Persist a batch of snapshots. Failures are logged and dropped;
    /// this is the best-effort path, nothing reaches a request.
    async fn write_snapshots(&self, snapshots: Vec<(DbId, SyncUpdate)>) {
        for (user_id, update) in snapshots {
            match UserRepo::apply_sync(&self.pool, user_id, &update).await {
                Ok(Some(_)) => {
                    tracing::debug!(user_id, "Progress snapshot written");
                }
                Ok(None) => {
                    tracing::warn!(user_id, "Progress snapshot for missing user, dropped");
                }
                Err(e) => {
                    tracing::error!(user_id, error = %e, "Failed to write progress snapshot");
                }
            }
        }
    }
}
