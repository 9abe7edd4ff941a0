//! Batch coordinator - sequences export jobs through the runner
//!
//! Jobs run strictly one after another: OneNote only handles one publish at a
//! time, so a job's trigger never starts before the previous job reached a
//! terminal state. Cancellation is checked before every job and passed down
//! into the runner.

use super::runner::{is_cancelled, ExportJobRunner};
use super::summary::BatchSummary;
use crate::domain::{ExportJob, JobStatus};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Batch export coordinator
pub struct BatchCoordinator {
    runner: Arc<ExportJobRunner>,
    active: Mutex<()>,
}

impl BatchCoordinator {
    /// Create a coordinator around a runner
    pub fn new(runner: Arc<ExportJobRunner>) -> Self {
        Self {
            runner,
            active: Mutex::new(()),
        }
    }

    /// Whether a batch is currently running on this coordinator
    pub fn is_running(&self) -> bool {
        self.active.try_lock().is_err()
    }

    /// Run every job in order and aggregate the outcomes
    ///
    /// Jobs not started because of cancellation are absent from the summary.
    /// A second call on the same coordinator waits until the first finishes.
    pub async fn run_all(
        &self,
        jobs: Vec<ExportJob>,
        cancel: &watch::Receiver<bool>,
    ) -> BatchSummary {
        let _active = self.active.lock().await;

        let started = Instant::now();
        let mut summary = BatchSummary::new();
        let total = jobs.len();

        tracing::info!(run_id = %summary.run_id, total_jobs = total, "Starting batch export");

        for (index, job) in jobs.iter().enumerate() {
            if is_cancelled(cancel) {
                tracing::warn!(
                    run_id = %summary.run_id,
                    remaining = total - index,
                    "Cancellation requested, skipping remaining notebooks"
                );
                summary.interrupted = true;
                break;
            }

            tracing::info!(
                run_id = %summary.run_id,
                job = index + 1,
                total_jobs = total,
                target_name = %job.target_name(),
                "Processing notebook"
            );

            let outcome = self.runner.run(job, cancel).await;
            let was_cancelled = outcome.status() == JobStatus::Cancelled;
            summary.record(outcome);

            if was_cancelled {
                summary.interrupted = true;
                break;
            }
        }

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();
        summary
    }

    /// Run the batch on a background task
    pub fn spawn(
        self: Arc<Self>,
        jobs: Vec<ExportJob>,
        cancel: watch::Receiver<bool>,
    ) -> JoinHandle<BatchSummary> {
        tokio::spawn(async move { self.run_all(jobs, &cancel).await })
    }
}
