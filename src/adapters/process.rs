//! Host process control
//!
//! Cancelling an export only stops the watcher; OneNote keeps writing. When the
//! user asks for it, the CLI runs this terminator alongside the batch to kill
//! the helper and OneNote itself. Nothing here reports back to the export
//! state machine.
//!
//! [`open_folder`] shows a finished export in the platform file manager.

use crate::domain::{OnexportError, Result};
use std::path::Path;
use tokio::process::Command;

/// Processes killed by default
pub const DEFAULT_HOST_PROCESSES: [&str; 2] = ["OneNoteHelper.exe", "ONENOTE.EXE"];

#[cfg(windows)]
const NOT_RUNNING_EXIT_CODE: i32 = 128;
#[cfg(not(windows))]
const NOT_RUNNING_EXIT_CODE: i32 = 1;

/// Result of a termination attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminationReport {
    /// Processes that were killed or were not running
    pub terminated: Vec<String>,
    /// Processes that could not be killed, with the reason
    pub failures: Vec<(String, String)>,
}

impl TerminationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Kills the OneNote host processes by image name
#[derive(Debug, Clone)]
pub struct HostProcessTerminator {
    process_names: Vec<String>,
}

impl Default for HostProcessTerminator {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_PROCESSES.iter().map(|s| s.to_string()).collect())
    }
}

impl HostProcessTerminator {
    pub fn new(process_names: Vec<String>) -> Self {
        Self { process_names }
    }

    pub fn process_names(&self) -> &[String] {
        &self.process_names
    }

    /// Kill every configured process; a process that is not running counts as terminated
    pub async fn terminate_all(&self) -> TerminationReport {
        let mut report = TerminationReport::default();

        for name in &self.process_names {
            match kill_by_name(name).await {
                Ok(()) => {
                    tracing::info!(process = %name, "Terminated host process");
                    report.terminated.push(name.clone());
                }
                Err(reason) => {
                    tracing::warn!(process = %name, reason = %reason, "Failed to terminate host process");
                    report.failures.push((name.clone(), reason));
                }
            }
        }

        report
    }
}

async fn kill_by_name(name: &str) -> std::result::Result<(), String> {
    let mut command = kill_command(name);
    let output = command
        .output()
        .await
        .map_err(|e| format!("failed to run kill command: {e}"))?;

    if output.status.success() {
        return Ok(());
    }

    if output.status.code() == Some(NOT_RUNNING_EXIT_CODE) {
        tracing::debug!(process = %name, "Host process not running");
        return Ok(());
    }

    Err(format!(
        "kill command exited with {}: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr).trim()
    ))
}

#[cfg(windows)]
fn kill_command(name: &str) -> Command {
    let mut command = Command::new("taskkill");
    command.args(["/F", "/IM", name]);
    command.creation_flags(0x0800_0000);
    command
}

#[cfg(not(windows))]
fn kill_command(name: &str) -> Command {
    let mut command = Command::new("pkill");
    command.args(["-x", name]);
    command
}

/// Open `path` in the file manager without waiting for it
pub fn open_folder(path: &Path) -> Result<()> {
    let mut command = open_command(path);
    command.spawn().map_err(|e| {
        OnexportError::Io(format!("failed to open {}: {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "Opened folder");
    Ok(())
}

fn open_command(path: &Path) -> Command {
    let program = if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    let mut command = Command::new(program);
    command.arg(path);
    command
}
