//! Backup command implementation
//!
//! Works on the backup folder OneNote maintains by itself, independent of the
//! publish-based `export` command: show it, total it, or copy it elsewhere.

use super::load_settings;
use crate::adapters::{open_folder, LocalFilesystem};
use crate::config::OnexportConfig;
use crate::core::backup::{BackupEntry, BackupInspector};
use crate::core::export::format_size;
use crate::log_error_with_context;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Folder created under the export destination when no backup destination is given
pub const DEFAULT_BACKUP_FOLDER_NAME: &str = "OneNote Backup";

/// Arguments for the backup command
#[derive(Args, Debug)]
pub struct BackupArgs {
    /// Override the OneNote backup folder
    #[arg(short, long)]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: BackupCommand,
}

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Show the backup folder as a tree
    List {
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Copy the backup folder to another location
    Export {
        /// Destination folder; defaults to "OneNote Backup" in the export destination
        #[arg(short, long)]
        destination: Option<String>,

        /// Open the destination in the file manager afterwards
        #[arg(long)]
        open: bool,
    },

    /// Show the total size of the backup folder
    Size,
}

impl BackupArgs {
    /// Execute the backup command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        if let Some(source) = &self.source {
            tracing::info!(source = %source, "Overriding backup folder from CLI");
            config.backup.source_dir = source.clone();
        }

        let source = config.backup.resolved_source_dir();
        let is_dir = tokio::fs::metadata(&source)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            tracing::error!(source = %source.display(), "OneNote backup folder not found");
            eprintln!("OneNote backup folder not found: {}", source.display());
            return Ok(2);
        }

        let inspector = BackupInspector::new(Arc::new(LocalFilesystem));

        match &self.command {
            BackupCommand::List { json } => list(&inspector, &source, *json).await,
            BackupCommand::Size => size(&inspector, &source).await,
            BackupCommand::Export { destination, open } => {
                let destination = backup_destination(destination.as_deref(), &config);
                export(&inspector, &source, &destination, *open).await
            }
        }
    }
}

async fn list(inspector: &BackupInspector, source: &Path, json: bool) -> anyhow::Result<i32> {
    let tree = match inspector.list_tree(source).await {
        Ok(t) => t,
        Err(e) => {
            log_error_with_context!(e, "Failed to read backup folder");
            eprintln!("Failed to read {}: {e}", source.display());
            return Ok(5);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(0);
    }

    println!("🗂️  {}", source.display());
    if tree.is_empty() {
        println!("  (empty)");
    }
    for line in render_tree(&tree) {
        println!("  {line}");
    }
    Ok(0)
}

async fn size(inspector: &BackupInspector, source: &Path) -> anyhow::Result<i32> {
    match inspector.total_size(source).await {
        Ok(bytes) => {
            println!("{}: {} ({bytes} bytes)", source.display(), format_size(bytes));
            Ok(0)
        }
        Err(e) => {
            log_error_with_context!(e, "Failed to measure backup folder");
            eprintln!("Failed to measure {}: {e}", source.display());
            Ok(5)
        }
    }
}

async fn export(
    inspector: &BackupInspector,
    source: &Path,
    destination: &Path,
    open: bool,
) -> anyhow::Result<i32> {
    println!(
        "📦 Copying {} to {}",
        source.display(),
        destination.display()
    );

    let report = match inspector.copy_tree(source, destination).await {
        Ok(r) => r,
        Err(e) => {
            log_error_with_context!(e, "Backup copy failed");
            eprintln!("Backup copy failed: {e}");
            return Ok(5);
        }
    };

    println!(
        "✅ Copied {} file(s) in {} folder(s), {}",
        report.files,
        report.directories,
        format_size(report.bytes)
    );

    if open {
        if let Err(e) = open_folder(destination) {
            tracing::warn!(error = %e, "Could not open destination folder");
            println!("⚠️  Could not open {}", destination.display());
        }
    }

    Ok(0)
}

fn backup_destination(explicit: Option<&str>, config: &OnexportConfig) -> PathBuf {
    match explicit.map(str::trim).filter(|d| !d.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => config
            .export
            .resolved_destination()
            .join(DEFAULT_BACKUP_FOLDER_NAME),
    }
}

/// One line per entry, indented by level
fn render_tree(entries: &[BackupEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    push_lines(entries, &mut lines);
    lines
}

fn push_lines(entries: &[BackupEntry], lines: &mut Vec<String>) {
    for entry in entries {
        let indent = "  ".repeat(entry.level as usize);
        if entry.is_dir {
            lines.push(format!("{indent}📁 {}", entry.name));
            push_lines(&entry.children, lines);
        } else {
            lines.push(format!(
                "{indent}📄 {} ({})",
                entry.name,
                format_size(entry.size_bytes)
            ));
        }
    }
}
