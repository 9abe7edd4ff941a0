//! Terminal result of a single export job

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Terminal state of an export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// A stable, nonzero artifact was confirmed
    Success,
    /// The artifact appeared but never grew past zero bytes
    EmptyFile,
    /// No stable artifact within the time budget
    Timeout,
    /// The caller requested cancellation
    Cancelled,
    /// The export command itself was rejected
    TriggerFailed,
}

impl JobStatus {
    /// Whether this status counts as a failure in batch statistics
    ///
    /// Cancellation is neither a success nor a failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            JobStatus::EmptyFile | JobStatus::Timeout | JobStatus::TriggerFailed
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Success => "success",
            JobStatus::EmptyFile => "empty_file",
            JobStatus::Timeout => "timeout",
            JobStatus::Cancelled => "cancelled",
            JobStatus::TriggerFailed => "trigger_failed",
        };
        f.write_str(s)
    }
}

/// Outcome of one export job
///
/// Only the export runner builds outcomes; callers get read-only access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    target_name: String,
    status: JobStatus,
    produced_path: Option<PathBuf>,
    final_size_bytes: u64,
    message: String,
    ticks_elapsed: u32,
    duration: Duration,
}

impl JobOutcome {
    pub(crate) fn new(
        target_name: impl Into<String>,
        status: JobStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            target_name: target_name.into(),
            status,
            produced_path: None,
            final_size_bytes: 0,
            message: message.into(),
            ticks_elapsed: 0,
            duration: Duration::ZERO,
        }
    }

    pub(crate) fn with_produced_path(mut self, path: PathBuf) -> Self {
        self.produced_path = Some(path);
        self
    }

    pub(crate) fn with_size(mut self, size: u64) -> Self {
        self.final_size_bytes = size;
        self
    }

    pub(crate) fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks_elapsed = ticks;
        self
    }

    pub(crate) fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Path of the finished artifact, only set on success
    pub fn produced_path(&self) -> Option<&Path> {
        self.produced_path.as_deref()
    }

    /// Size at confirmation (success) or the last observed size
    pub fn final_size_bytes(&self) -> u64 {
        self.final_size_bytes
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Number of poll ticks consumed before the terminal state
    pub fn ticks_elapsed(&self) -> u32 {
        self.ticks_elapsed
    }

    /// Wall-clock time from trigger to terminal state
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }

    /// One-line report entry: `✓ name` or `✗ name: reason`
    pub fn summary_line(&self) -> String {
        if self.is_success() {
            format!("✓ {}", self.target_name)
        } else {
            format!("✗ {}: {}", self.target_name, self.message)
        }
    }
}
