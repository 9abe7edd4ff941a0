//! Helper program client
//!
//! OneNote's COM API is reached through a small helper executable. Each call
//! spawns the helper, writes one request to its stdin and reads one response
//! from its stdout. Diagnostics the helper writes to stderr are passed through.

use super::models::{OpenHierarchyResult, RpcRequest, RpcResponse};
use crate::adapters::automation::{NotebookAutomation, OpenedHandle};
use crate::config::HelperConfig;
use crate::domain::errors::AutomationError;
use crate::domain::{ExportJob, NotebookInfo, OnexportError, Result, VersionInfo};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// File name of the helper executable
pub const HELPER_EXECUTABLE: &str = "OneNoteHelper.exe";

const RELEASE_DIR: [&str; 3] = ["bin", "Release", "net8.0-windows"];

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Client for the OneNote helper program
#[derive(Debug)]
pub struct HelperClient {
    helper_path: PathBuf,
    call_timeout: Duration,
    next_id: AtomicU64,
}

impl HelperClient {
    /// Create a client for a known helper executable
    pub fn new(helper_path: impl Into<PathBuf>, call_timeout: Duration) -> Self {
        Self {
            helper_path: helper_path.into(),
            call_timeout,
            next_id: AtomicU64::new(1),
        }
    }

    /// Locate the helper executable and build a client for it
    ///
    /// # Errors
    ///
    /// Returns `HelperNotFound` if neither the configured path nor any of the
    /// default locations holds the helper.
    pub fn discover(config: &HelperConfig) -> Result<Self> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        let explicit = config.path.as_deref().map(PathBuf::from);
        let candidates = candidate_paths(explicit.as_deref(), &exe_dir);

        for candidate in &candidates {
            tracing::debug!(path = %candidate.display(), "Looking for OneNote helper");
            if candidate.is_file() {
                tracing::info!(path = %candidate.display(), "Found OneNote helper");
                return Ok(Self::new(
                    candidate.clone(),
                    Duration::from_secs(config.call_timeout_secs),
                ));
            }
        }

        let searched = candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(AutomationError::HelperNotFound(format!(
            "{HELPER_EXECUTABLE} not found (searched: {searched}). Build the helper first \
             (cd OneNoteHelper && dotnet build -c Release) or set helper.path"
        ))
        .into())
    }

    /// Path of the helper executable this client runs
    pub fn helper_path(&self) -> &Path {
        &self.helper_path
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Option<Value>) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = serde_json::to_vec(&RpcRequest { method, params, id })?;

        tracing::debug!(method = method, id = id, "Calling OneNote helper");

        let mut command = Command::new(&self.helper_path);
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let mut child = command
            .spawn()
            .map_err(|e| AutomationError::HelperFailed(format!("failed to start helper: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&request)
                .await
                .map_err(|e| AutomationError::HelperFailed(format!("failed to send request: {e}")))?;
        }

        let output = tokio::time::timeout(self.call_timeout, child.wait_with_output())
            .await
            .map_err(|_| AutomationError::Timeout(self.call_timeout.as_secs()))?
            .map_err(|e| AutomationError::HelperFailed(e.to_string()))?;

        if !output.status.success() && output.stdout.is_empty() {
            return Err(AutomationError::HelperFailed(format!(
                "helper exited with {}",
                output.status
            ))
            .into());
        }

        let value = RpcResponse::parse(&output.stdout, id)?;
        serde_json::from_value(value).map_err(|e| {
            OnexportError::from(AutomationError::InvalidResponse(format!(
                "unexpected result for {method}: {e}"
            )))
        })
    }
}

#[async_trait]
impl NotebookAutomation for HelperClient {
    async fn version(&self) -> Result<VersionInfo> {
        self.call("GetVersion", None).await
    }

    async fn list_notebooks(&self) -> Result<Vec<NotebookInfo>> {
        self.call("GetNotebooks", None).await
    }

    async fn open_notebook(&self, job: &ExportJob) -> Result<OpenedHandle> {
        if job.target_path().is_empty() {
            return Ok(OpenedHandle::new(job.target_id().as_str()));
        }

        let opened: OpenHierarchyResult = self
            .call("OpenHierarchy", Some(json!({ "path": job.target_path() })))
            .await
            .map_err(|e| AutomationError::OpenFailed(e.detail()))?;

        Ok(OpenedHandle::new(opened.object_id))
    }

    async fn publish(
        &self,
        handle: &OpenedHandle,
        target_path: &Path,
        format_code: i32,
    ) -> Result<()> {
        let params = json!({
            "hierarchyId": handle.hierarchy_id(),
            "targetFilePath": target_path.to_string_lossy(),
            "format": format_code,
        });

        self.call::<Value>("Publish", Some(params))
            .await
            .map_err(|e| AutomationError::PublishRejected(e.detail()))?;
        Ok(())
    }
}

/// Locations searched for the helper, in order
pub fn candidate_paths(explicit: Option<&Path>, exe_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }

    let release = |base: PathBuf| -> PathBuf {
        RELEASE_DIR
            .iter()
            .fold(base.join("OneNoteHelper"), |acc, part| acc.join(part))
            .join(HELPER_EXECUTABLE)
    };

    candidates.push(release(exe_dir.to_path_buf()));
    candidates.push(exe_dir.join("OneNoteHelper").join(HELPER_EXECUTABLE));
    candidates.push(release(exe_dir.join("..")));
    candidates.push(release(PathBuf::new()));
    candidates
}
