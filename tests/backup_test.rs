//! Integration tests for the OneNote backup folder on a real disk
//!
//! The fixture mirrors what OneNote writes: one directory per notebook with
//! dated section backups, plus nested section groups.

use onexport::adapters::LocalFilesystem;
use onexport::core::backup::{BackupInspector, CopyReport};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn inspector() -> BackupInspector {
    BackupInspector::new(Arc::new(LocalFilesystem))
}

/// Sicherung/
///   Personal/Recipes.one (300 bytes)
///   Work/Meetings (On 14.10.2026).one (1000 bytes)
///   Work/Projects/Roadmap.one (2500 bytes)
///   Work/Projects/Archive/ (empty)
fn backup_fixture(root: &Path) {
    fs::create_dir_all(root.join("Personal")).unwrap();
    fs::create_dir_all(root.join("Work").join("Projects").join("Archive")).unwrap();
    fs::write(root.join("Personal").join("Recipes.one"), vec![1u8; 300]).unwrap();
    fs::write(
        root.join("Work").join("Meetings (On 14.10.2026).one"),
        vec![2u8; 1000],
    )
    .unwrap();
    fs::write(
        root.join("Work").join("Projects").join("Roadmap.one"),
        vec![3u8; 2500],
    )
    .unwrap();
}

#[tokio::test]
async fn test_list_tree_reports_levels_and_children() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Sicherung");
    backup_fixture(&root);

    let tree = inspector().list_tree(&root).await.unwrap();

    let names: Vec<&str> = tree.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Personal", "Work"]);
    assert!(tree.iter().all(|e| e.is_dir && e.level == 0));

    let work = &tree[1];
    assert_eq!(work.path, root.join("Work"));
    let work_names: Vec<&str> = work.children.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(work_names, vec!["Meetings (On 14.10.2026).one", "Projects"]);

    let meetings = &work.children[0];
    assert!(!meetings.is_dir);
    assert_eq!(meetings.level, 1);
    assert_eq!(meetings.size_bytes, 1000);

    let projects = &work.children[1];
    assert_eq!(projects.level, 1);
    let archive = &projects.children[0];
    assert_eq!(archive.name, "Archive");
    assert_eq!(archive.level, 2);
    assert!(archive.is_dir);
    assert!(archive.children.is_empty());
    assert_eq!(projects.children[1].name, "Roadmap.one");
    assert_eq!(projects.children[1].level, 2);
}

#[tokio::test]
async fn test_list_tree_missing_folder_fails() {
    let dir = TempDir::new().unwrap();
    let result = inspector().list_tree(&dir.path().join("Sicherung")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_total_size_sums_files_at_every_depth() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Sicherung");
    backup_fixture(&root);

    assert_eq!(inspector().total_size(&root).await.unwrap(), 3800);

    let empty = dir.path().join("empty");
    fs::create_dir(&empty).unwrap();
    assert_eq!(inspector().total_size(&empty).await.unwrap(), 0);
}

#[tokio::test]
async fn test_copy_tree_recreates_structure() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Sicherung");
    backup_fixture(&root);
    let destination = dir.path().join("Downloads").join("OneNote Backup");

    let report = inspector().copy_tree(&root, &destination).await.unwrap();

    assert_eq!(
        report,
        CopyReport {
            files: 3,
            directories: 4,
            bytes: 3800,
        }
    );
    assert_eq!(
        fs::read(destination.join("Work").join("Projects").join("Roadmap.one")).unwrap(),
        vec![3u8; 2500]
    );
    assert!(destination.join("Work").join("Projects").join("Archive").is_dir());
    assert_eq!(inspector().total_size(&destination).await.unwrap(), 3800);
}

#[tokio::test]
async fn test_copy_tree_overwrites_previous_copy() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Sicherung");
    backup_fixture(&root);
    let destination = dir.path().join("copy");
    fs::create_dir_all(destination.join("Personal")).unwrap();
    fs::write(destination.join("Personal").join("Recipes.one"), b"old").unwrap();
    fs::write(destination.join("unrelated.txt"), b"keep").unwrap();

    inspector().copy_tree(&root, &destination).await.unwrap();

    assert_eq!(
        fs::read(destination.join("Personal").join("Recipes.one")).unwrap(),
        vec![1u8; 300]
    );
    assert_eq!(fs::read(destination.join("unrelated.txt")).unwrap(), b"keep");
}

#[cfg(unix)]
#[tokio::test]
async fn test_copy_tree_keeps_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Sicherung");
    backup_fixture(&root);
    let section = root.join("Personal").join("Recipes.one");
    fs::set_permissions(&section, fs::Permissions::from_mode(0o640)).unwrap();
    let destination = dir.path().join("copy");

    inspector().copy_tree(&root, &destination).await.unwrap();

    let mode = fs::metadata(destination.join("Personal").join("Recipes.one"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o640);
}

#[tokio::test]
async fn test_copy_tree_missing_source_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("copy");

    let result = inspector()
        .copy_tree(&dir.path().join("Sicherung"), &destination)
        .await;

    assert!(result.is_err());
    assert!(!destination.exists());
}
