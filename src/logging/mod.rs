//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - JSON log files with rotation
//! - Configurable log levels (overridable through `RUST_LOG`)
//!
//! # Example
//!
//! ```no_run
//! use onexport::logging::init_logging;
//! use onexport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export job
///
/// # Example
///
/// ```no_run
/// use onexport::log_job_start;
/// use onexport::domain::{ExportJob, LocationHint, NotebookId, OutputKind};
///
/// let job = ExportJob::new(
///     NotebookId::new("{A1B2}").unwrap(),
///     "Work",
///     LocationHint::Local,
///     "/backups",
///     OutputKind::Pdf,
/// )
/// .unwrap();
/// log_job_start!(job, std::path::Path::new("/backups/Work.pdf"));
/// ```
#[macro_export]
macro_rules! log_job_start {
    ($job:expr, $expected_path:expr) => {
        tracing::info!(
            target_name = %$job.target_name(),
            target_id = %$job.target_id(),
            location = %$job.location_hint(),
            format = %$job.output_kind(),
            expected_path = %$expected_path.display(),
            "Starting notebook export"
        );
    };
}

/// Log the terminal outcome of an export job
///
/// Successes log at info level, everything else at warn.
#[macro_export]
macro_rules! log_job_outcome {
    ($outcome:expr) => {
        if $outcome.is_success() {
            tracing::info!(
                target_name = %$outcome.target_name(),
                status = %$outcome.status(),
                size_bytes = $outcome.final_size_bytes(),
                ticks = $outcome.ticks_elapsed(),
                duration_ms = $outcome.duration().as_millis() as u64,
                "Notebook export finished"
            );
        } else {
            tracing::warn!(
                target_name = %$outcome.target_name(),
                status = %$outcome.status(),
                size_bytes = $outcome.final_size_bytes(),
                ticks = $outcome.ticks_elapsed(),
                duration_ms = $outcome.duration().as_millis() as u64,
                reason = %$outcome.message(),
                "Notebook export finished"
            );
        }
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use onexport::log_error_with_context;
/// use onexport::domain::OnexportError;
///
/// let error = OnexportError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use onexport::log_retry_attempt;
///
/// log_retry_attempt!(1, 2, "Publish rejected: notebook not synced");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
