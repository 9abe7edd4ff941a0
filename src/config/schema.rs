//! Configuration schema types
//!
//! This module defines the configuration structure for onexport.

use crate::domain::OutputKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main onexport configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnexportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// OneNote helper bridge settings
    #[serde(default)]
    pub helper: HelperConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// OneNote backup folder settings
    #[serde(default)]
    pub backup: BackupConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OnexportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.helper.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Helper bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Explicit path to the helper executable; searched for when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Deadline for a single helper call in seconds
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

impl HelperConfig {
    fn validate(&self) -> Result<(), String> {
        if self.call_timeout_secs == 0 {
            return Err("helper.call_timeout_secs must be > 0".to_string());
        }
        if matches!(self.path.as_deref(), Some(p) if p.trim().is_empty()) {
            return Err("helper.path cannot be empty when set".to_string());
        }
        Ok(())
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            path: None,
            call_timeout_secs: default_call_timeout_secs(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the exported files are written to
    ///
    /// Empty means the user's Downloads folder.
    #[serde(default)]
    pub destination_dir: String,

    /// Output format (onepkg, pdf, xps)
    #[serde(default)]
    pub format: OutputKind,

    /// Notebook names or IDs to export; empty exports every open notebook
    #[serde(default)]
    pub notebooks: Vec<String>,

    /// Retry a rejected publish once for network-hosted notebooks
    #[serde(default = "default_true")]
    pub network_trigger_retry: bool,

    /// Delay before that retry, giving OneNote time to sync
    #[serde(default = "default_network_retry_delay_secs")]
    pub network_retry_delay_secs: u64,

    /// Kill the OneNote processes when an export is interrupted
    ///
    /// OneNote keeps writing after a cancelled export otherwise.
    #[serde(default)]
    pub terminate_host_on_cancel: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.network_retry_delay_secs > 300 {
            return Err(format!(
                "export.network_retry_delay_secs must be <= 300, got {}",
                self.network_retry_delay_secs
            ));
        }

        if let Some(blank) = self.notebooks.iter().position(|n| n.trim().is_empty()) {
            return Err(format!("export.notebooks[{blank}] cannot be empty"));
        }

        Ok(())
    }

    /// Destination directory with the Downloads fallback applied
    pub fn resolved_destination(&self) -> PathBuf {
        if !self.destination_dir.trim().is_empty() {
            return PathBuf::from(self.destination_dir.trim());
        }

        std::env::var_os("USERPROFILE")
            .or_else(|| std::env::var_os("HOME"))
            .map(|home| PathBuf::from(home).join("Downloads"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            destination_dir: String::new(),
            format: OutputKind::default(),
            notebooks: Vec::new(),
            network_trigger_retry: true,
            network_retry_delay_secs: default_network_retry_delay_secs(),
            terminate_host_on_cancel: false,
        }
    }
}

/// Folder names OneNote uses for its automatic backups, per UI language
const BACKUP_FOLDER_NAMES: [&str; 2] = ["Backup", "Sicherung"];

/// OneNote backup folder configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupConfig {
    /// Folder OneNote writes its automatic backups to
    ///
    /// Empty means `%USERPROFILE%\AppData\Local\Microsoft\OneNote\16.0\Backup`, or
    /// `Sicherung` on German installations.
    #[serde(default)]
    pub source_dir: String,
}

impl BackupConfig {
    /// Backup folder with the OneNote default applied
    pub fn resolved_source_dir(&self) -> PathBuf {
        if !self.source_dir.trim().is_empty() {
            return PathBuf::from(self.source_dir.trim());
        }

        let home = std::env::var_os("USERPROFILE")
            .or_else(|| std::env::var_os("HOME"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        default_backup_dir(&home)
    }
}

/// The first existing backup folder under `home`, or the German one when none exists
pub fn default_backup_dir(home: &Path) -> PathBuf {
    let base = home
        .join("AppData")
        .join("Local")
        .join("Microsoft")
        .join("OneNote")
        .join("16.0");

    BACKUP_FOLDER_NAMES
        .iter()
        .map(|name| base.join(name))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| base.join("Sicherung"))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_call_timeout_secs() -> u64 {
    120
}

fn default_network_retry_delay_secs() -> u64 {
    5
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
