//! Core business logic for onexport.
//!
//! # Export Workflow
//!
//! For every notebook in a batch:
//!
//! 1. **Prepare**: create the destination directory and remove a stale file
//!    at the expected output path
//! 2. **Trigger**: open the notebook and issue the publish command
//! 3. **Poll**: watch the output file until its size stays nonzero and
//!    unchanged for five ticks
//! 4. **Classify**: success, empty file, timeout, or cancelled
//! 5. **Report**: fold the outcome into the batch summary
//!
//! [`backup`] is separate: it lists, sizes and copies the backup folder
//! OneNote maintains on its own.
//!
//! # Example
//!
//! ```rust,no_run
//! use onexport::adapters::{HelperClient, LocalFilesystem};
//! use onexport::config::HelperConfig;
//! use onexport::core::export::{BatchCoordinator, ExportJobRunner};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let helper = HelperClient::discover(&HelperConfig::default())?;
//! let runner = ExportJobRunner::new(Arc::new(helper), Arc::new(LocalFilesystem));
//! let coordinator = BatchCoordinator::new(Arc::new(runner));
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let summary = coordinator.run_all(Vec::new(), &shutdown_rx).await;
//!
//! println!("Succeeded: {}", summary.succeeded);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod export;
