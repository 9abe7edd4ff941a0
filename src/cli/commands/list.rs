//! List command implementation
//!
//! Shows the notebooks open in OneNote with the timeout tier each one gets.

use super::{load_settings, select_notebooks};
use crate::adapters::{HelperClient, NotebookAutomation};
use crate::core::export::PollPolicy;
use crate::domain::NotebookInfo;
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the notebooks as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
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
                tracing::error!(error = %e, "OneNote helper unavailable");
                eprintln!("{e}");
                return Ok(4);
            }
        };

        let notebooks = match helper.list_notebooks().await {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list notebooks");
                eprintln!("Failed to list OneNote notebooks: {}", e.detail());
                return Ok(4);
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&notebooks)?);
            return Ok(0);
        }

        if notebooks.is_empty() {
            println!("No notebooks are open in OneNote.");
            return Ok(0);
        }

        let (selected, _) = select_notebooks(&notebooks, &config.export.notebooks);
        let policy = PollPolicy::default();

        println!("📓 Open notebooks ({}):", notebooks.len());
        for notebook in &notebooks {
            let marker = if selected.iter().any(|s| s.id == notebook.id) {
                "*"
            } else {
                " "
            };
            println!("  {marker} {}", describe(notebook, &policy));
        }
        println!();
        println!("  * selected for export by the current configuration");

        Ok(0)
    }
}

fn describe(notebook: &NotebookInfo, policy: &PollPolicy) -> String {
    let hint = notebook.location_hint();
    let budget_minutes = policy.budget(hint).as_secs() / 60;
    let modified = notebook
        .last_modified
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "{} [{hint}, up to {budget_minutes} min] modified {modified}{}",
        notebook.name,
        if notebook.is_currently_viewed {
            " (viewing)"
        } else {
            ""
        }
    )
}
