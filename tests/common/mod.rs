#![allow(dead_code)]

pub mod command;
pub mod file;

use std::path::Path;
use walkdir::WalkDir;

pub const GITLET_DIR: &str = ".gitlet";
pub const STAGING_FILE: &str = ".gitlet/staging/stagingarea.json";
pub const PENDING_BLOBS_DIR: &str = ".gitlet/staging/blobs_to_add";
pub const BLOBS_DIR: &str = ".gitlet/blobs";
pub const COMMITS_DIR: &str = ".gitlet/commits";
pub const BRANCHES_DIR: &str = ".gitlet/branches";

/// Names of the regular files directly inside `dir`, sorted
pub fn list_dir_files(dir: &Path) -> Vec<String> {
    let mut names = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Failed to list directory {:?}: {}", dir, e))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    names.sort();
    names
}

/// Snapshot of every file under `.gitlet`, used to prove a command changed nothing
pub fn snapshot_metadata(dir: &Path) -> Vec<(String, Vec<u8>)> {
    WalkDir::new(dir.join(GITLET_DIR))
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let path = entry.path();
            let content = std::fs::read(path)
                .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e));
            (path.display().to_string(), content)
        })
        .collect()
}
