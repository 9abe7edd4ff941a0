//! Notebook automation trait definition
//!
//! This module defines the `NotebookAutomation` trait that abstracts the
//! scripting surface of OneNote Desktop. The export runner only ever talks to
//! OneNote through this trait, so tests can substitute a scripted fake.

use crate::domain::{ExportJob, NotebookInfo, Result, VersionInfo};
use async_trait::async_trait;
use std::path::Path;

/// Handle to a notebook opened in OneNote
///
/// Wraps the hierarchy ID that OneNote returns from `OpenHierarchy`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenedHandle(String);

impl OpenedHandle {
    pub fn new(hierarchy_id: impl Into<String>) -> Self {
        Self(hierarchy_id.into())
    }

    pub fn hierarchy_id(&self) -> &str {
        &self.0
    }
}

/// Trait for OneNote automation bridges
///
/// `publish` is fire-and-forget: it returns as soon as OneNote has accepted the
/// command, long before the output file is complete. Callers must watch the
/// target path to learn when the export has finished.
#[async_trait]
pub trait NotebookAutomation: Send + Sync {
    /// Version of the bridge and of the installed OneNote
    async fn version(&self) -> Result<VersionInfo>;

    /// List every notebook OneNote knows about
    async fn list_notebooks(&self) -> Result<Vec<NotebookInfo>>;

    /// Open the job's notebook, syncing it first if it is network-hosted
    ///
    /// # Errors
    ///
    /// Returns an error if the notebook is inaccessible or password protected.
    async fn open_notebook(&self, job: &ExportJob) -> Result<OpenedHandle>;

    /// Ask OneNote to publish the opened notebook to `target_path`
    ///
    /// # Errors
    ///
    /// Returns an error only for immediate rejections (malformed path,
    /// format not supported for this notebook).
    async fn publish(&self, handle: &OpenedHandle, target_path: &Path, format_code: i32)
        -> Result<()>;
}
