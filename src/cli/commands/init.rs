//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing onexport configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Open the notebooks you want to back up in OneNote");
                println!("  3. Check which notebooks are visible: onexport list");
                println!("  4. Validate configuration: onexport validate-config");
                println!("  5. Run export: onexport export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# onexport Configuration File
# Exports OneNote Desktop notebooks and waits for each file to be complete

[application]
# trace | debug | info | warn | error
log_level = "info"

[helper]
# Path to OneNoteHelper.exe; searched next to onexport when unset
# path = 'C:\Tools\OneNoteHelper.exe'

# Deadline for a single call to the helper, in seconds
call_timeout_secs = 120

[export]
# Where exported files are written; empty means your Downloads folder
# Literal strings (single quotes) keep Windows backslashes as they are
destination_dir = ""

# onepkg | pdf | xps
format = "onepkg"

# Notebook names or IDs to export; empty exports every open notebook
notebooks = []

# Retry once when OneNote rejects a publish of an OneDrive/SharePoint notebook
network_trigger_retry = true
network_retry_delay_secs = 5

# Kill OneNote when an export is interrupted (Ctrl+C). OneNote otherwise
# keeps writing the file it was exporting.
terminate_host_on_cancel = false

[backup]
# OneNote's own automatic backup folder, used by `onexport backup`.
# Empty means %USERPROFILE%\AppData\Local\Microsoft\OneNote\16.0\Backup
# (Sicherung on German installations)
source_dir = ""

[logging]
# Enable local file logging
local_enabled = true

# Directory for log files
local_path = "logs"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use crate::domain::OutputKind;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: DEFAULT_CONFIG_FILE.to_string(),
            force: false,
        };

        assert_eq!(args.output, "onexport.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generated_config_is_loadable() {
        let config = load_config_from_str(&InitArgs::generate_config()).unwrap();
        assert_eq!(config.export.format, OutputKind::Onepkg);
        assert!(config.export.notebooks.is_empty());
        assert_eq!(config.logging.local_rotation, "daily");
        assert!(config.backup.source_dir.is_empty());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("onexport.toml");
        fs::write(&path, "# existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# existing");

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[export]"));
    }
}
