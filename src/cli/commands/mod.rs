//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod backup;
pub mod export;
pub mod init;
pub mod list;
pub mod validate;
pub mod version;

use crate::config::{load_config, load_config_from_str, OnexportConfig};
use crate::domain::{NotebookInfo, Result};
use std::path::Path;

/// Load the configuration file, or defaults when it does not exist
///
/// Environment overrides and validation apply either way.
pub(crate) fn load_settings(config_path: &str) -> Result<OnexportConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::info!(
            config_path = %config_path,
            "No configuration file found, using defaults"
        );
        load_config_from_str("")
    }
}

/// Pick the notebooks matching `filters`, keeping OneNote's order
///
/// An empty filter list selects everything. Returns the filters that matched
/// nothing alongside the selection.
pub(crate) fn select_notebooks<'a>(
    notebooks: &'a [NotebookInfo],
    filters: &[String],
) -> (Vec<&'a NotebookInfo>, Vec<String>) {
    if filters.is_empty() {
        return (notebooks.iter().collect(), Vec::new());
    }

    let selected = notebooks
        .iter()
        .filter(|nb| filters.iter().any(|f| nb.matches(f)))
        .collect();

    let unmatched = filters
        .iter()
        .filter(|f| !notebooks.iter().any(|nb| nb.matches(f)))
        .cloned()
        .collect();

    (selected, unmatched)
}
