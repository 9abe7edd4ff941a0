//! Filesystem access used while watching export artifacts and copying the
//! OneNote backup folder

use crate::domain::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem operations the export runner needs
#[async_trait]
pub trait ArtifactFilesystem: Send + Sync {
    /// Size of the file at `path`, or `None` if nothing exists there
    async fn file_size(&self, path: &Path) -> Result<Option<u64>>;

    /// Delete the file at `path`
    async fn remove_file(&self, path: &Path) -> Result<()>;

    /// Create `path` and all missing parents
    async fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// File length in bytes; zero for directories
    pub len: u64,
}

/// Directory walking and copying on top of [`ArtifactFilesystem`]
///
/// Symbolic links are reported as files and never descended into.
#[async_trait]
pub trait BackupFilesystem: ArtifactFilesystem {
    /// Entries directly inside `path`, sorted by name
    async fn read_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>>;

    /// Copy one file, overwriting `dst` and keeping the permission bits of `src`
    ///
    /// Returns the number of bytes copied.
    async fn copy_file(&self, src: &Path, dst: &Path) -> Result<u64>;
}

/// [`ArtifactFilesystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ArtifactFilesystem for LocalFilesystem {
    async fn file_size(&self, path: &Path) -> Result<Option<u64>> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => Ok(Some(metadata.len())),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        tokio::fs::remove_file(path).await?;
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path).await?;
        Ok(())
    }
}

#[async_trait]
impl BackupFilesystem for LocalFilesystem {
    async fn read_dir(&self, path: &Path) -> Result<Vec<DirEntryInfo>> {
        let mut reader = tokio::fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            // DirEntry::metadata does not follow symlinks
            let metadata = entry.metadata().await?;
            let is_dir = metadata.is_dir();
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_dir,
                len: if is_dir { 0 } else { metadata.len() },
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn copy_file(&self, src: &Path, dst: &Path) -> Result<u64> {
        Ok(tokio::fs::copy(src, dst).await?)
    }
}
