// onexport - OneNote Desktop notebook exporter
// Copyright (c) 2025 onexport Contributors
// Licensed under the MIT License

//! # onexport - OneNote Desktop notebook exporter
//!
//! onexport publishes OneNote Desktop notebooks to `.onepkg`, `.pdf` or `.xps`
//! files and reports, per notebook, whether the file really is complete.
//!
//! ## Overview
//!
//! OneNote's publish command returns before the file is written and offers
//! no completion signal. onexport therefore watches the output file after
//! triggering the export and only calls it finished once its size has been
//! nonzero and unchanged for five consecutive polls. Files that stay empty,
//! never stabilize, or are cancelled are reported as such.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export runner, completion detection and batch coordination
//! - [`adapters`] - OneNote helper bridge, filesystem and process control
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use onexport::adapters::{HelperClient, LocalFilesystem, NotebookAutomation};
//! use onexport::config::load_config;
//! use onexport::core::export::{BatchCoordinator, ExportJobRunner};
//! use onexport::domain::ExportJob;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("onexport.toml")?;
//!     let helper = Arc::new(HelperClient::discover(&config.helper)?);
//!
//!     let destination = config.export.resolved_destination();
//!     let jobs = helper
//!         .list_notebooks()
//!         .await?
//!         .iter()
//!         .map(|nb| ExportJob::from_notebook(nb, &destination, config.export.format))
//!         .collect::<Result<Vec<_>, _>>()?;
//!
//!     let runner = ExportJobRunner::new(helper, Arc::new(LocalFilesystem));
//!     let coordinator = BatchCoordinator::new(Arc::new(runner));
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let summary = coordinator.run_all(jobs, &shutdown_rx).await;
//!
//!     for line in &summary.per_job_messages {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`] with [`domain::OnexportError`].
//! The export runner never fails: every problem ends up in a
//! [`domain::JobOutcome`] with a status and a message.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
