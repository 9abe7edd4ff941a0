//! Export execution and batch coordination
//!
//! This module provides the core export logic for onexport:
//! - Output file naming
//! - Completion detection for a single export job
//! - Sequential batch coordination with cooperative cancellation
//! - Summary and reporting

pub mod coordinator;
pub mod naming;
mod poll;
pub mod progress;
pub mod runner;
pub mod summary;

pub use coordinator::BatchCoordinator;
pub use naming::{expected_output_path, sanitize_file_name};
pub use poll::{
    PollPolicy, LOCAL_MAX_TICKS, NETWORK_MAX_TICKS, POLL_INTERVAL, REQUIRED_STABLE_TICKS,
};
pub use progress::{format_size, ProgressSink};
pub use runner::ExportJobRunner;
pub use summary::BatchSummary;
