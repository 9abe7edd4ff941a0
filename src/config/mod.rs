//! Configuration management for onexport.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! onexport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ONEXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use onexport::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("onexport.toml")?;
//!
//! println!("Destination: {}", config.export.resolved_destination().display());
//! println!("Format: {}", config.export.format);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`HelperConfig`] - Location and call deadline of the OneNote helper
//! - [`ExportConfig`] - Destination, format, notebook selection, retry and cancel behavior
//! - [`BackupConfig`] - Location of OneNote's own backup folder
//! - [`LoggingConfig`] - Local log file settings
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! destination_dir = '${USERPROFILE}\Documents\OneNote Backups'
//! format = "onepkg"
//! notebooks = ["Work", "Personal"]
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str, DEFAULT_CONFIG_FILE};
pub use schema::{
    default_backup_dir, ApplicationConfig, BackupConfig, ExportConfig, HelperConfig,
    LoggingConfig, OnexportConfig,
};
