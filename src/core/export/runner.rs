//! Export job runner
//!
//! Turns one [`ExportJob`] into exactly one [`JobOutcome`]: prepares the
//! destination, triggers the publish through the automation bridge, then
//! watches the output file until it is complete, empty, timed out or the
//! caller cancels.

use super::naming::expected_output_path;
use super::poll::{Observation, PollPolicy, PollState};
use super::progress::{format_size, ProgressSink};
use crate::adapters::{ArtifactFilesystem, NotebookAutomation};
use crate::domain::{ExportJob, JobOutcome, JobStatus, LocationHint, OnexportError};
use crate::{log_job_outcome, log_job_start, log_retry_attempt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

const CANCELLED_MESSAGE: &str = "export cancelled";

/// Why a job stopped before polling
enum TriggerAbort {
    Failed { message: String, code: Option<i64> },
    Cancelled,
}

impl TriggerAbort {
    fn failed(message: String) -> Self {
        TriggerAbort::Failed {
            message,
            code: None,
        }
    }

    fn from_error(error: &OnexportError) -> Self {
        TriggerAbort::Failed {
            message: error.detail(),
            code: error.code(),
        }
    }
}

/// Runs single export jobs
pub struct ExportJobRunner {
    automation: Arc<dyn NotebookAutomation>,
    filesystem: Arc<dyn ArtifactFilesystem>,
    policy: PollPolicy,
    network_retry_delay: Option<Duration>,
    progress: Option<ProgressSink>,
}

impl ExportJobRunner {
    /// Create a runner with the default poll policy and no trigger retry
    pub fn new(
        automation: Arc<dyn NotebookAutomation>,
        filesystem: Arc<dyn ArtifactFilesystem>,
    ) -> Self {
        Self {
            automation,
            filesystem,
            policy: PollPolicy::default(),
            network_retry_delay: None,
            progress: None,
        }
    }

    /// Replace the poll policy
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Retry a failed trigger once for network-hosted notebooks, after `delay`
    pub fn with_network_retry(mut self, delay: Duration) -> Self {
        self.network_retry_delay = Some(delay);
        self
    }

    /// Report per-tick status lines to `sink`
    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Export one notebook and wait for OneNote to finish writing it
    ///
    /// Never fails: every collaborator error ends up in the returned outcome.
    /// Cancellation is observed before the trigger and at every tick; the
    /// file OneNote is writing may keep growing after `Cancelled` is returned.
    pub async fn run(&self, job: &ExportJob, cancel: &watch::Receiver<bool>) -> JobOutcome {
        let started = Instant::now();
        let mut cancel = cancel.clone();
        let expected_path = expected_output_path(job);

        log_job_start!(job, expected_path);

        let outcome = if is_cancelled(&cancel) {
            JobOutcome::new(job.target_name(), JobStatus::Cancelled, CANCELLED_MESSAGE)
        } else {
            match self.trigger(job, &expected_path, &mut cancel).await {
                Ok(()) => self.await_completion(job, &expected_path, &mut cancel).await,
                Err(TriggerAbort::Cancelled) => {
                    JobOutcome::new(job.target_name(), JobStatus::Cancelled, CANCELLED_MESSAGE)
                }
                Err(TriggerAbort::Failed { message, code }) => {
                    tracing::warn!(
                        target_name = %job.target_name(),
                        code,
                        error = %message,
                        "Export trigger failed"
                    );
                    JobOutcome::new(job.target_name(), JobStatus::TriggerFailed, message)
                }
            }
        };

        let outcome = outcome.with_duration(started.elapsed());
        log_job_outcome!(outcome);
        outcome
    }

    async fn trigger(
        &self,
        job: &ExportJob,
        expected_path: &Path,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<(), TriggerAbort> {
        self.filesystem
            .create_dir_all(job.destination_dir())
            .await
            .map_err(|e| {
                TriggerAbort::failed(format!(
                    "failed to create destination directory {}: {}",
                    job.destination_dir().display(),
                    e.detail()
                ))
            })?;

        // A leftover file from an aborted run would look like a finished export
        match self.filesystem.file_size(expected_path).await {
            Ok(Some(stale_size)) => {
                tracing::info!(
                    path = %expected_path.display(),
                    size_bytes = stale_size,
                    "Removing stale export file"
                );
                self.filesystem
                    .remove_file(expected_path)
                    .await
                    .map_err(|e| {
                        TriggerAbort::failed(format!(
                            "failed to remove existing file {}: {}",
                            expected_path.display(),
                            e.detail()
                        ))
                    })?;
            }
            Ok(None) => {}
            Err(e) => {
                return Err(TriggerAbort::failed(format!(
                    "cannot inspect output path {}: {}",
                    expected_path.display(),
                    e.detail()
                )));
            }
        }

        let attempts = match (job.location_hint(), self.network_retry_delay) {
            (LocationHint::Network, Some(_)) => 2,
            _ => 1,
        };

        for attempt in 1..=attempts {
            match self.open_and_publish(job, expected_path).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < attempts => {
                    log_retry_attempt!(attempt, attempts, e.detail());
                    let delay = self.network_retry_delay.unwrap_or_default();
                    self.report(&format!(
                        "{}: export rejected, retrying after {}s sync delay",
                        job.target_name(),
                        delay.as_secs()
                    ));
                    if sleep_or_cancelled(delay, cancel).await {
                        return Err(TriggerAbort::Cancelled);
                    }
                }
                Err(e) => return Err(TriggerAbort::from_error(&e)),
            }
        }

        Err(TriggerAbort::failed("export was never triggered".to_string()))
    }

    async fn open_and_publish(
        &self,
        job: &ExportJob,
        expected_path: &Path,
    ) -> Result<(), OnexportError> {
        let handle = self.automation.open_notebook(job).await?;
        tracing::debug!(
            target_name = %job.target_name(),
            hierarchy_id = %handle.hierarchy_id(),
            "Notebook opened"
        );

        self.automation
            .publish(&handle, expected_path, job.output_kind().format_code())
            .await?;
        tracing::info!(
            target_name = %job.target_name(),
            format = %job.output_kind(),
            "Publish triggered"
        );
        Ok(())
    }

    async fn await_completion(
        &self,
        job: &ExportJob,
        expected_path: &Path,
        cancel: &mut watch::Receiver<bool>,
    ) -> JobOutcome {
        let name = job.target_name();
        let max_ticks = self.policy.max_ticks(job.location_hint());
        let mut state = PollState::new(self.policy.required_stable_ticks());

        for tick in 1..=max_ticks {
            if is_cancelled(cancel) {
                return cancelled(name, &state, tick - 1);
            }

            let observed = match self.filesystem.file_size(expected_path).await {
                Ok(size) => size,
                Err(e) => {
                    // Files being written concurrently can be briefly unreadable
                    tracing::debug!(tick = tick, error = %e, "Export file not readable yet");
                    None
                }
            };

            let observation = state.observe(observed);
            self.report_tick(name, tick, observation);

            if let Observation::Complete { size } = observation {
                return JobOutcome::new(
                    name,
                    JobStatus::Success,
                    format!("exported {} to {}", format_size(size), expected_path.display()),
                )
                .with_produced_path(absolute(expected_path))
                .with_size(size)
                .with_ticks(tick);
            }

            if sleep_or_cancelled(self.policy.poll_interval(), cancel).await {
                return cancelled(name, &state, tick);
            }
        }

        let budget = describe_budget(self.policy.budget(job.location_hint()));
        if state.ended_empty() {
            JobOutcome::new(
                name,
                JobStatus::EmptyFile,
                format!("export file stayed empty for {budget}; OneNote aborted the export"),
            )
            .with_ticks(max_ticks)
        } else {
            let message = if state.file_ever_seen() {
                format!(
                    "export file did not stabilize within {budget} (last size {}); \
                     OneNote may still finish it in the background",
                    format_size(state.last_size())
                )
            } else {
                format!(
                    "export file did not appear within {budget}; \
                     OneNote may still finish it in the background"
                )
            };
            JobOutcome::new(name, JobStatus::Timeout, message)
                .with_size(state.last_size())
                .with_ticks(max_ticks)
        }
    }

    fn report_tick(&self, name: &str, tick: u32, observation: Observation) {
        tracing::debug!(target_name = %name, tick = tick, observation = ?observation, "Poll tick");

        let line = match observation {
            Observation::Missing => {
                let waited = self.policy.poll_interval() * (tick - 1);
                format!(
                    "{name}: waiting for export file to appear ({}s)",
                    waited.as_secs()
                )
            }
            Observation::Empty => format!("{name}: export file created, still empty"),
            Observation::Growing { size } => format!("{name}: writing, {}", format_size(size)),
            Observation::Stable { size, ticks } => format!(
                "{name}: size stable at {} ({ticks}/{})",
                format_size(size),
                self.policy.required_stable_ticks()
            ),
            Observation::Complete { size } => {
                format!("{name}: export complete, {}", format_size(size))
            }
        };
        self.report(&line);
    }

    fn report(&self, line: &str) {
        if let Some(sink) = &self.progress {
            sink(line);
        }
    }
}

fn cancelled(name: &str, state: &PollState, ticks: u32) -> JobOutcome {
    JobOutcome::new(name, JobStatus::Cancelled, CANCELLED_MESSAGE)
        .with_size(state.last_size())
        .with_ticks(ticks)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn describe_budget(budget: Duration) -> String {
    let secs = budget.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{secs}s")
    }
}

/// Whether cancellation has been requested
pub(crate) fn is_cancelled(cancel: &watch::Receiver<bool>) -> bool {
    *cancel.borrow()
}

/// Sleep for `duration`, waking early on cancellation; returns whether cancelled
pub(crate) async fn sleep_or_cancelled(
    duration: Duration,
    cancel: &mut watch::Receiver<bool>,
) -> bool {
    if is_cancelled(cancel) {
        return true;
    }

    tokio::select! {
        _ = tokio::time::sleep(duration) => is_cancelled(cancel),
        _ = wait_for_cancel(cancel) => true,
    }
}

async fn wait_for_cancel(cancel: &mut watch::Receiver<bool>) {
    // A dropped sender can never cancel
    if cancel.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
