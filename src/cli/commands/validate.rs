//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the onexport configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Helper: {}",
            config.helper.path.as_deref().unwrap_or("(search default locations)")
        );
        println!("  Helper Call Timeout: {}s", config.helper.call_timeout_secs);
        println!(
            "  Destination: {}",
            config.export.resolved_destination().display()
        );
        println!("  Format: {}", config.export.format);
        println!(
            "  Notebooks: {}",
            if config.export.notebooks.is_empty() {
                "All".to_string()
            } else {
                config.export.notebooks.join(", ")
            }
        );
        println!(
            "  Network Retry: {}",
            if config.export.network_trigger_retry {
                format!("after {}s", config.export.network_retry_delay_secs)
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  Terminate OneNote on Cancel: {}",
            config.export.terminate_host_on_cancel
        );
        println!(
            "  Backup Folder: {}",
            config.backup.resolved_source_dir().display()
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file_is_config_error() {
        let args = ValidateArgs {};
        let code = args.execute("/nonexistent/onexport.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_good_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[export]\nformat = \"pdf\"\n").unwrap();
        file.flush().unwrap();

        let args = ValidateArgs {};
        let code = args.execute(&file.path().to_string_lossy()).await.unwrap();
        assert_eq!(code, 0);
    }
}
