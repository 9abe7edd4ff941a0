//! OneNote backup folder inspection and copying
//!
//! OneNote keeps its own automatic backups of every notebook in a per-user
//! folder. [`BackupInspector`] lists that folder as a tree, totals its size and
//! copies it somewhere safer. All disk access goes through
//! [`BackupFilesystem`] so the walk can be tested against a fake.

use crate::adapters::{BackupFilesystem, DirEntryInfo};
use crate::domain::{OnexportError, Result};
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

/// A file or directory in the backup folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// File length in bytes; zero for directories
    pub size_bytes: u64,
    /// Depth below the backup folder, 0 for its direct entries
    pub level: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BackupEntry>,
}

/// What a copy of the backup folder wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    pub files: u64,
    pub directories: u64,
    pub bytes: u64,
}

type TreeFuture<'a> = Pin<Box<dyn Future<Output = Vec<BackupEntry>> + Send + 'a>>;

/// Walks and copies the OneNote backup folder
pub struct BackupInspector {
    fs: Arc<dyn BackupFilesystem>,
}

impl BackupInspector {
    pub fn new(fs: Arc<dyn BackupFilesystem>) -> Self {
        Self { fs }
    }

    /// Entries of `root` with their children, sorted by name on every level
    ///
    /// Fails only when `root` itself cannot be read. A subdirectory that cannot
    /// be read is listed without children.
    pub async fn list_tree(&self, root: &Path) -> Result<Vec<BackupEntry>> {
        let entries = self.fs.read_dir(root).await?;
        let mut tree = Vec::with_capacity(entries.len());

        for entry in sorted(entries) {
            let children = if entry.is_dir {
                self.children(entry.path.clone(), 1).await
            } else {
                Vec::new()
            };
            tree.push(BackupEntry {
                name: entry.name,
                path: entry.path,
                is_dir: entry.is_dir,
                size_bytes: entry.len,
                level: 0,
                children,
            });
        }

        Ok(tree)
    }

    fn children(&self, dir: PathBuf, level: u32) -> TreeFuture<'_> {
        Box::pin(async move {
            let entries = match self.fs.read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %dir.display(),
                        error = %e,
                        "Skipping unreadable backup directory"
                    );
                    return Vec::new();
                }
            };

            let mut children = Vec::with_capacity(entries.len());
            for entry in sorted(entries) {
                let nested = if entry.is_dir {
                    self.children(entry.path.clone(), level + 1).await
                } else {
                    Vec::new()
                };
                children.push(BackupEntry {
                    name: entry.name,
                    path: entry.path,
                    is_dir: entry.is_dir,
                    size_bytes: entry.len,
                    level,
                    children: nested,
                });
            }
            children
        })
    }

    /// Total bytes of every file below `root`
    pub async fn total_size(&self, root: &Path) -> Result<u64> {
        let mut total = 0u64;
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in self.fs.read_dir(&dir).await? {
                if entry.is_dir {
                    pending.push(entry.path);
                } else {
                    total = total.saturating_add(entry.len);
                }
            }
        }

        Ok(total)
    }

    /// Copy everything inside `src` into `dst`, creating `dst` as needed
    ///
    /// Existing files in `dst` are overwritten. The first failure aborts the
    /// copy; files copied before it stay in place.
    pub async fn copy_tree(&self, src: &Path, dst: &Path) -> Result<CopyReport> {
        if dst.starts_with(src) {
            return Err(OnexportError::Validation(format!(
                "cannot copy {} into itself ({})",
                src.display(),
                dst.display()
            )));
        }

        tracing::info!(
            source = %src.display(),
            destination = %dst.display(),
            "Copying OneNote backup folder"
        );

        let mut report = CopyReport::default();
        let mut pending = vec![(src.to_path_buf(), dst.to_path_buf())];

        while let Some((from, to)) = pending.pop() {
            let entries = self.fs.read_dir(&from).await?;
            self.fs.create_dir_all(&to).await?;

            for entry in entries {
                let target = to.join(&entry.name);
                if entry.is_dir {
                    report.directories += 1;
                    pending.push((entry.path, target));
                } else {
                    let bytes = self
                        .fs
                        .copy_file(&entry.path, &target)
                        .await
                        .map_err(|e| match e {
                            OnexportError::Io(reason) => OnexportError::Io(format!(
                                "failed to copy {}: {reason}",
                                entry.path.display()
                            )),
                            other => other,
                        })?;
                    tracing::debug!(file = %entry.path.display(), bytes, "Copied backup file");
                    report.files += 1;
                    report.bytes += bytes;
                }
            }
        }

        tracing::info!(
            files = report.files,
            directories = report.directories,
            bytes = report.bytes,
            "OneNote backup folder copied"
        );
        Ok(report)
    }
}

fn sorted(mut entries: Vec<DirEntryInfo>) -> Vec<DirEntryInfo> {
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
