//! Background workers persisting click events.
//!
//! A [`ClickWorkerPool`] runs a fixed number of independent tokio tasks, each
//! looping over [`run_click_worker`]: take one event from the shared
//! [`ClickQueue`], write it through the [`ClickRepository`], repeat. A failed
//! write is logged and skipped; it never stops the worker. Persistence is
//! at-most-once: no retry, no dead-letter queue.
//!
//! Workers stop when the queue is closed and drained. An event a worker has
//! already taken is always written (or fails) before that worker exits.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::domain::click_queue::ClickQueue;
use crate::domain::repositories::ClickRepository;

/// Counters reported by a single worker when it stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub recorded: u64,
    pub failed: u64,
}

/// Drains `queue` until it is closed, persisting each event via `repository`.
///
/// Returns how many writes succeeded and failed.
pub async fn run_click_worker<R>(
    worker_id: usize,
    queue: Arc<ClickQueue>,
    repository: Arc<R>,
) -> WorkerReport
where
    R: ClickRepository + ?Sized,
{
    debug!(worker_id, "Click worker running");
    let mut report = WorkerReport::default();

    while let Some(event) = queue.dequeue().await {
        let link_id = event.link_id;
        let short_code = event.short_code.clone();

        match repository.record_click(event.into()).await {
            Ok(click) => {
                report.recorded += 1;
                metrics::counter!("clicks_recorded_total").increment(1);
                debug!(worker_id, link_id, click_id = click.id, %short_code, "Click recorded");
            }
            Err(e) => {
                report.failed += 1;
                metrics::counter!("clicks_failed_total").increment(1);
                error!(worker_id, link_id, %short_code, error = %e, "Failed to save click");
            }
        }
    }

    debug!(worker_id, ?report, "Click worker stopped");
    report
}

/// A fixed-size pool of click workers sharing one queue.
pub struct ClickWorkerPool {
    queue: Arc<ClickQueue>,
    workers: Vec<JoinHandle<WorkerReport>>,
}

impl ClickWorkerPool {
    /// Spawns `worker_count` workers draining `queue` into `repository`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<R>(queue: Arc<ClickQueue>, repository: Arc<R>, worker_count: usize) -> Self
    where
        R: ClickRepository + ?Sized + 'static,
    {
        let workers = (0..worker_count)
            .map(|worker_id| {
                tokio::spawn(run_click_worker(
                    worker_id,
                    queue.clone(),
                    repository.clone(),
                ))
            })
            .collect();

        info!(
            worker_count,
            queue_capacity = queue.capacity(),
            "Click workers started"
        );

        Self { queue, workers }
    }

    /// Number of workers spawned.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Closes the queue and waits for every worker to finish.
    ///
    /// Events still buffered at the time of the call are drained before the
    /// workers exit. Returns the combined counters of all workers.
    pub async fn shutdown(self) -> WorkerReport {
        self.queue.close();

        let mut total = WorkerReport::default();
        for handle in self.workers {
            match handle.await {
                Ok(report) => {
                    total.recorded += report.recorded;
                    total.failed += report.failed;
                }
                Err(e) => error!(error = %e, "Click worker task failed"),
            }
        }

        info!(
            recorded = total.recorded,
            failed = total.failed,
            "Click workers stopped"
        );
        total
    }
}
