//! Background cache refreshers.
//!
//! One tokio task per record kind. Each iteration waits for the interval and
//! then rescans the kind's directory on the blocking pool, so edits made
//! outside the process show up in `list()` within one interval. An iteration
//! finishes before the next one starts.
//!
//! # Usage
//!
//! ```rust,ignore
//! let manager = RefreshManager::new();
//! manager.start(store.clone(), Duration::from_secs(5));
//!
//! // On shutdown:
//! manager.stop_all().await;
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::records::{Kind, Record};
use crate::shared::errors::StoreResult;
use crate::store::{RecordStore, RefreshReport};

/// Anything whose cache can be rebuilt from disk.
pub trait Refreshable: Send + Sync + 'static {
    fn kind(&self) -> Kind;

    fn refresh_now(&self) -> StoreResult<RefreshReport>;
}

impl<R: Record> Refreshable for RecordStore<R> {
    fn kind(&self) -> Kind {
        R::KIND
    }

    fn refresh_now(&self) -> StoreResult<RefreshReport> {
        self.refresh()
    }
}

struct RefreshTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Owns the running refreshers, at most one per kind.
pub struct RefreshManager {
    tasks: Mutex<HashMap<Kind, RefreshTask>>,
}

impl RefreshManager {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Spawns a refresher for the store's kind. Must be called from within a
    /// tokio runtime. Returns false if one is already running.
    pub fn start(&self, store: Arc<dyn Refreshable>, interval: Duration) -> bool {
        let kind = store.kind();
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);

        if tasks.contains_key(&kind) {
            tracing::debug!(target: "refresh", kind = %kind, "Refresher already running");
            return false;
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run_refresher(store, interval, stop_rx));

        tracing::info!(
            target: "refresh",
            kind = %kind,
            interval_ms = interval.as_millis() as u64,
            "Refresher started"
        );

        tasks.insert(kind, RefreshTask { stop_tx, handle });
        true
    }

    /// Signals the kind's refresher and waits for it to exit. No-op when none runs.
    pub async fn stop(&self, kind: Kind) {
        let task = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&kind);

        if let Some(task) = task {
            shutdown_task(kind, task).await;
            tracing::info!(target: "refresh", kind = %kind, "Refresher stopped");
        }
    }

    pub fn is_running(&self, kind: Kind) -> bool {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&kind)
    }

    /// Kinds with a running refresher, sorted.
    pub fn active_kinds(&self) -> Vec<Kind> {
        let mut kinds: Vec<Kind> = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        kinds.sort();
        kinds
    }

    pub async fn stop_all(&self) {
        let drained: Vec<(Kind, RefreshTask)> = self
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();

        for (kind, task) in drained {
            shutdown_task(kind, task).await;
            tracing::info!(target: "refresh", kind = %kind, "Refresher stopped (stop_all)");
        }
    }
}

impl Default for RefreshManager {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_task(kind: Kind, task: RefreshTask) {
    // The receiver may already be gone if the task ended on its own.
    let _ = task.stop_tx.send(true);
    if let Err(e) = task.handle.await {
        tracing::error!(target: "refresh", kind = %kind, error = %e, "Refresher task failed");
    }
}

async fn run_refresher(
    store: Arc<dyn Refreshable>,
    interval: Duration,
    mut stop_rx: watch::Receiver<bool>,
) {
    let kind = store.kind();

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    tracing::debug!(target: "refresh", kind = %kind, "Received stop signal");
                    break;
                }
                continue;
            }
        }

        let worker = Arc::clone(&store);
        match tokio::task::spawn_blocking(move || worker.refresh_now()).await {
            Ok(Ok(report)) => {
                if report.skipped.is_empty() {
                    tracing::debug!(
                        target: "refresh",
                        kind = %kind,
                        loaded = report.loaded,
                        generation = report.generation,
                        "Refreshed"
                    );
                } else {
                    tracing::warn!(
                        target: "refresh",
                        kind = %kind,
                        loaded = report.loaded,
                        skipped = report.skipped.len(),
                        generation = report.generation,
                        "Refreshed with skipped files"
                    );
                }
            }
            Ok(Err(e)) => {
                tracing::error!(target: "refresh", kind = %kind, error = %e, "Refresh failed");
            }
            Err(e) => {
                tracing::error!(target: "refresh", kind = %kind, error = %e, "Refresh task panicked");
            }
        }

        if *stop_rx.borrow() {
            break;
        }
    }
}
