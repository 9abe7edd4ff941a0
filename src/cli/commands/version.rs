//! Version command implementation

use super::load_settings;
use crate::adapters::{HelperClient, NotebookAutomation};
use clap::Args;

/// Arguments for the version command
#[derive(Args, Debug)]
pub struct VersionArgs {}

impl VersionArgs {
    /// Execute the version command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("onexport {}", env!("CARGO_PKG_VERSION"));

        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let helper = match HelperClient::discover(&config.helper) {
            Ok(h) => h,
            Err(e) => {
                println!("Helper: not found ({e})");
                return Ok(4);
            }
        };
        println!("Helper: {}", helper.helper_path().display());

        match helper.version().await {
            Ok(info) => {
                println!("Helper version: {}", info.version);
                if info.one_note_installed {
                    println!("OneNote: {}", info.one_note_version);
                    Ok(0)
                } else {
                    println!("OneNote: not installed");
                    Ok(4)
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Helper version query failed");
                println!("Helper version: unavailable ({})", e.detail());
                Ok(4)
            }
        }
    }
}
