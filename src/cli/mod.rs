//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for onexport using clap.

pub mod commands;

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};

/// onexport - OneNote Desktop notebook exporter
#[derive(Parser, Debug)]
#[command(name = "onexport")]
#[command(version, about, long_about = None)]
#[command(author = "onexport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "ONEXPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ONEXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export OneNote notebooks and wait for every file to be complete
    Export(commands::export::ExportArgs),

    /// List the notebooks open in OneNote
    List(commands::list::ListArgs),

    /// Inspect or copy the backup folder OneNote maintains itself
    Backup(commands::backup::BackupArgs),

    /// Show helper and OneNote versions
    Version(commands::version::VersionArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
