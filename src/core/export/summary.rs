//! Batch summary and reporting
//!
//! This module defines the aggregate result of one batch run.

use crate::domain::{JobOutcome, JobStatus};
use std::time::Duration;
use uuid::Uuid;

/// Summary of a batch export
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Identifier of the run, for correlating log lines
    pub run_id: Uuid,

    /// Number of jobs that produced a complete file
    pub succeeded: usize,

    /// Number of jobs that ended empty, timed out, or failed to trigger
    pub failed: usize,

    /// Number of jobs stopped by cancellation
    pub cancelled: usize,

    /// One human-readable line per job, in submission order
    pub per_job_messages: Vec<String>,

    /// Full outcome per job, in submission order
    pub outcomes: Vec<JobOutcome>,

    /// Whether cancellation stopped the batch before every job ran
    pub interrupted: bool,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl BatchSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            succeeded: 0,
            failed: 0,
            cancelled: 0,
            per_job_messages: Vec::new(),
            outcomes: Vec::new(),
            interrupted: false,
            duration: Duration::ZERO,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fold one job outcome into the summary
    pub fn record(&mut self, outcome: JobOutcome) {
        match outcome.status() {
            JobStatus::Success => self.succeeded += 1,
            JobStatus::Cancelled => self.cancelled += 1,
            JobStatus::EmptyFile | JobStatus::Timeout | JobStatus::TriggerFailed => {
                self.failed += 1
            }
        }
        self.per_job_messages.push(outcome.summary_line());
        self.outcomes.push(outcome);
    }

    /// Number of jobs recorded
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.cancelled
    }

    /// True iff no job failed
    ///
    /// Cancelled jobs do not count as failures; check `interrupted` to tell a
    /// clean run from one that was stopped early.
    pub fn overall_success(&self) -> bool {
        self.failed == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            total = self.total(),
            succeeded = self.succeeded,
            failed = self.failed,
            cancelled = self.cancelled,
            interrupted = self.interrupted,
            duration_secs = self.duration.as_secs(),
            "Batch export completed"
        );

        for outcome in self.outcomes.iter().filter(|o| o.status().is_failure()) {
            tracing::warn!(
                target_name = %outcome.target_name(),
                status = %outcome.status(),
                reason = %outcome.message(),
                "Notebook export failed"
            );
        }
    }
}

impl Default for BatchSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, status: JobStatus) -> JobOutcome {
        JobOutcome::new(name, status, format!("{status}"))
    }

    #[test]
    fn test_batch_summary_creation() {
        let summary = BatchSummary::new();

        assert_eq!(summary.total(), 0);
        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.cancelled, 0);
        assert!(summary.per_job_messages.is_empty());
        assert!(!summary.interrupted);
        assert!(summary.overall_success());
    }

    #[test]
    fn test_batch_summary_with_duration() {
        let summary = BatchSummary::new().with_duration(Duration::from_secs(120));
        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_record_counts_by_status() {
        let mut summary = BatchSummary::new();
        summary.record(outcome("A", JobStatus::Success));
        summary.record(outcome("B", JobStatus::Timeout));
        summary.record(outcome("C", JobStatus::EmptyFile));
        summary.record(outcome("D", JobStatus::TriggerFailed));
        summary.record(outcome("E", JobStatus::Cancelled));

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.per_job_messages.len(), 5);
        assert_eq!(summary.per_job_messages[0], "✓ A");
        assert!(summary.per_job_messages[1].starts_with("✗ B"));
        assert!(!summary.overall_success());
    }

    #[test]
    fn test_cancelled_jobs_do_not_fail_the_batch() {
        let mut summary = BatchSummary::new();
        summary.record(outcome("A", JobStatus::Success));
        summary.record(outcome("B", JobStatus::Cancelled));
        summary.interrupted = true;

        assert!(summary.overall_success());
        assert!(summary.interrupted);
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(BatchSummary::new().run_id, BatchSummary::new().run_id);
    }
}
