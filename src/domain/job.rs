//! Export job descriptor
//!
//! An [`ExportJob`] is one unit of work for the export runner: which notebook,
//! where its output goes, and in which format.

use super::ids::NotebookId;
use super::notebook::NotebookInfo;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format of a published notebook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// OneNote package archive (`.onepkg`)
    #[default]
    Onepkg,
    /// Portable Document Format
    Pdf,
    /// XML Paper Specification
    Xps,
}

impl OutputKind {
    /// OneNote `PublishFormat` enumeration value for this kind
    pub fn format_code(&self) -> i32 {
        match self {
            OutputKind::Onepkg => 1,
            OutputKind::Pdf => 3,
            OutputKind::Xps => 4,
        }
    }

    /// File extension including the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Onepkg => ".onepkg",
            OutputKind::Pdf => ".pdf",
            OutputKind::Xps => ".xps",
        }
    }

    /// Configuration name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Onepkg => "onepkg",
            OutputKind::Pdf => "pdf",
            OutputKind::Xps => "xps",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "onepkg" | "package" => Ok(OutputKind::Onepkg),
            "pdf" => Ok(OutputKind::Pdf),
            "xps" => Ok(OutputKind::Xps),
            other => Err(format!(
                "Invalid output format '{other}'. Must be one of: onepkg, pdf, xps"
            )),
        }
    }
}

/// Where a notebook lives, which decides how long an export may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationHint {
    /// Notebook stored on a local disk
    #[default]
    Local,
    /// Notebook hosted on OneDrive, SharePoint or a network share
    Network,
}

impl LocationHint {
    /// Classify a notebook by its OneNote path
    ///
    /// URLs (`https://d.docs.live.net/...`) and UNC shares (`\\server\share`)
    /// count as network-hosted; everything else is local.
    pub fn from_notebook_path(path: &str) -> Self {
        let lowered = path.trim().to_lowercase();
        if lowered.starts_with("http://")
            || lowered.starts_with("https://")
            || lowered.starts_with("\\\\")
            || lowered.starts_with("//")
        {
            LocationHint::Network
        } else {
            LocationHint::Local
        }
    }
}

impl fmt::Display for LocationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationHint::Local => f.write_str("local"),
            LocationHint::Network => f.write_str("network"),
        }
    }
}

/// One notebook export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    target_id: NotebookId,
    target_name: String,
    target_path: String,
    location_hint: LocationHint,
    destination_dir: PathBuf,
    output_kind: OutputKind,
}

impl ExportJob {
    /// Create a new export job
    ///
    /// # Errors
    ///
    /// Returns an error if the destination directory is empty.
    pub fn new(
        target_id: NotebookId,
        target_name: impl Into<String>,
        location_hint: LocationHint,
        destination_dir: impl Into<PathBuf>,
        output_kind: OutputKind,
    ) -> Result<Self, String> {
        let destination_dir = destination_dir.into();
        if destination_dir.as_os_str().is_empty() {
            return Err("Destination directory cannot be empty".to_string());
        }

        Ok(Self {
            target_id,
            target_name: target_name.into(),
            target_path: String::new(),
            location_hint,
            destination_dir,
            output_kind,
        })
    }

    /// Build a job for a listed notebook
    pub fn from_notebook(
        notebook: &NotebookInfo,
        destination_dir: impl Into<PathBuf>,
        output_kind: OutputKind,
    ) -> Result<Self, String> {
        let job = Self::new(
            notebook.id.clone(),
            notebook.name.clone(),
            notebook.location_hint(),
            destination_dir,
            output_kind,
        )?;
        Ok(job.with_target_path(notebook.path.clone()))
    }

    /// Set the path OneNote uses to open the notebook
    pub fn with_target_path(mut self, path: impl Into<String>) -> Self {
        self.target_path = path.into();
        self
    }

    pub fn target_id(&self) -> &NotebookId {
        &self.target_id
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Path OneNote opens the notebook from; empty when only the ID is known
    pub fn target_path(&self) -> &str {
        &self.target_path
    }

    pub fn location_hint(&self) -> LocationHint {
        self.location_hint
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    pub fn output_kind(&self) -> OutputKind {
        self.output_kind
    }
}
