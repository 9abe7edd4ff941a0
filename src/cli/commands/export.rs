//! Export command implementation
//!
//! This module implements the `export` command: publish the selected OneNote
//! notebooks one after another and wait for each file to be complete.

use super::{load_settings, select_notebooks};
use crate::adapters::{
    open_folder, HelperClient, HostProcessTerminator, LocalFilesystem, NotebookAutomation,
};
use crate::config::OnexportConfig;
use crate::core::export::{format_size, BatchCoordinator, BatchSummary, ExportJobRunner};
use crate::domain::{ExportJob, JobStatus, OutputKind};
use crate::log_error_with_context;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Override the destination directory
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Override the output format (onepkg, pdf, xps)
    #[arg(short, long)]
    pub format: Option<OutputKind>,

    /// Export only this notebook (name or ID); repeatable
    #[arg(short = 'n', long = "notebook", value_name = "NAME_OR_ID")]
    pub notebooks: Vec<String>,

    /// Open the destination folder when every notebook exported successfully
    #[arg(long)]
    pub open: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2); // Configuration error exit code
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let helper = match HelperClient::discover(&config.helper) {
            Ok(h) => h,
            Err(e) => {
                log_error_with_context!(e, "OneNote helper unavailable");
                eprintln!("{e}");
                return Ok(4); // Helper/connection error exit code
            }
        };
        let automation: Arc<dyn NotebookAutomation> = Arc::new(helper);

        let notebooks = match automation.list_notebooks().await {
            Ok(n) => n,
            Err(e) => {
                log_error_with_context!(e, "Failed to list notebooks");
                eprintln!("Failed to list OneNote notebooks: {}", e.detail());
                return Ok(4);
            }
        };

        let (selected, unmatched) = select_notebooks(&notebooks, &config.export.notebooks);
        for filter in &unmatched {
            tracing::warn!(filter = %filter, "No open notebook matches filter");
            println!("⚠️  No open notebook matches '{filter}'");
        }

        if selected.is_empty() {
            if config.export.notebooks.is_empty() {
                println!("No notebooks are open in OneNote. Nothing to export.");
                return Ok(0);
            }
            eprintln!("None of the requested notebooks are open in OneNote.");
            return Ok(2);
        }

        let destination = config.export.resolved_destination();
        let format = config.export.format;
        let mut jobs = Vec::with_capacity(selected.len());
        for notebook in selected {
            match ExportJob::from_notebook(notebook, &destination, format) {
                Ok(job) => jobs.push(job),
                Err(e) => {
                    eprintln!("Invalid export job for '{}': {e}", notebook.name);
                    return Ok(2);
                }
            }
        }

        if !self.yes && !confirm(&jobs, &config)? {
            println!("Export cancelled.");
            return Ok(0);
        }

        let runner = build_runner(automation, &config);
        let coordinator = Arc::new(BatchCoordinator::new(Arc::new(runner)));

        let terminator = config
            .export
            .terminate_host_on_cancel
            .then(|| spawn_host_terminator(shutdown_signal.clone()));

        println!("🚀 Exporting {} notebook(s) to {}", jobs.len(), destination.display());
        println!();

        let summary = match coordinator.spawn(jobs, shutdown_signal).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export task failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        if let Some(handle) = terminator {
            if summary.interrupted {
                // Give the kill a chance to finish before the process exits
                let _ = tokio::time::timeout(Duration::from_secs(10), handle).await;
            } else {
                handle.abort();
            }
        }

        print_summary(&summary);

        let exit_code = if summary.interrupted {
            println!("⚠️  Export interrupted. OneNote may still be writing the last file.");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.overall_success() {
            println!("✅ Export completed successfully!");
            if self.open {
                if let Err(e) = open_folder(&destination) {
                    tracing::warn!(error = %e, "Could not open destination folder");
                    println!("⚠️  Could not open {}", destination.display());
                }
            }
            0
        } else {
            println!("⚠️  Export completed with failures");
            1 // Partial success
        };

        Ok(exit_code)
    }

    fn apply_overrides(&self, config: &mut OnexportConfig) {
        if let Some(destination) = &self.destination {
            tracing::info!(destination = %destination, "Overriding destination from CLI");
            config.export.destination_dir = destination.clone();
        }

        if let Some(format) = self.format {
            tracing::info!(format = %format, "Overriding output format from CLI");
            config.export.format = format;
        }

        if !self.notebooks.is_empty() {
            tracing::info!(notebooks = ?self.notebooks, "Overriding notebook selection from CLI");
            config.export.notebooks = self.notebooks.clone();
        }
    }
}

fn build_runner(
    automation: Arc<dyn NotebookAutomation>,
    config: &OnexportConfig,
) -> ExportJobRunner {
    let runner = ExportJobRunner::new(automation, Arc::new(LocalFilesystem))
        .with_progress(Arc::new(|line: &str| println!("  {line}")));

    if config.export.network_trigger_retry {
        runner.with_network_retry(Duration::from_secs(config.export.network_retry_delay_secs))
    } else {
        runner
    }
}

/// Kill OneNote once shutdown is requested; it keeps writing otherwise
fn spawn_host_terminator(mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if shutdown.wait_for(|stop| *stop).await.is_err() {
            return;
        }

        let report = HostProcessTerminator::default().terminate_all().await;
        if report.is_success() {
            tracing::info!(processes = ?report.terminated, "OneNote processes terminated");
        } else {
            for (name, reason) in &report.failures {
                tracing::warn!(process = %name, reason = %reason, "Failed to terminate process");
            }
        }
    })
}

fn confirm(jobs: &[ExportJob], config: &OnexportConfig) -> anyhow::Result<bool> {
    use std::io::{self, Write};

    println!("Export Configuration:");
    println!("  Destination: {}", config.export.resolved_destination().display());
    println!("  Format: {}", config.export.format);
    println!("  Notebooks:");
    for job in jobs {
        println!("    - {} ({})", job.target_name(), job.location_hint());
    }
    println!();
    print!("Proceed with export? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_summary(summary: &BatchSummary) {
    println!();
    println!("📊 Export Summary:");
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    if summary.cancelled > 0 {
        println!("  Cancelled: {}", summary.cancelled);
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    for outcome in &summary.outcomes {
        match (outcome.status(), outcome.produced_path()) {
            (JobStatus::Success, Some(path)) => println!(
                "  {} ({}, {})",
                outcome.summary_line(),
                format_size(outcome.final_size_bytes()),
                path.display()
            ),
            _ => println!("  {}", outcome.summary_line()),
        }
    }
    println!();
}
