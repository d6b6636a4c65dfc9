use crate::areas::repository::GITLET_DIR;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn a user-supplied path into one relative to the workspace root
    ///
    /// Absolute paths inside the root are relativized. Paths that leave the root or
    /// point into the metadata directory are rejected.
    pub fn relative_path(&self, raw: &str) -> anyhow::Result<PathBuf> {
        let raw_path = Path::new(raw);
        let raw_path = if raw_path.is_absolute() {
            raw_path
                .strip_prefix(self.path.as_ref())
                .map_err(|_| GitletError::invalid_argument(format!("{raw} is outside the repository")))?
        } else {
            raw_path
        };

        let mut relative = PathBuf::new();
        for component in raw_path.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(GitletError::invalid_argument(format!(
                        "{raw} is outside the repository"
                    ))
                    .into());
                }
            }
        }

        if relative.as_os_str().is_empty() || Self::is_ignored(&relative) {
            return Err(GitletError::invalid_argument(format!("{raw} is not a trackable file")).into());
        }

        Ok(relative)
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    /// Every regular file under the workspace root, relative and sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = WalkDir::new(&self.path)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != GITLET_DIR)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.path.as_ref())
                    .ok()
                    .map(PathBuf::from)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => name == GITLET_DIR,
            _ => false,
        })
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    /// Overwrite (or create) a working file with `data`
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for: {:?}", file_path))?;
        }

        if path.is_dir() {
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove existing directory: {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a working file; a file that is already gone is not an error
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let path = self.path.join(file_path);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::{FileWriteStr, PathChild};
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_files_recursively_without_metadata_dir() {
        let dir = TempDir::new().unwrap();
        dir.child("a.txt").write_str("a").unwrap();
        dir.child("nested/b.txt").write_str("b").unwrap();
        dir.child(".gitlet/staging/stagingarea.json").write_str("{}").unwrap();

        let workspace = Workspace::new(dir.path().into());

        assert_eq!(
            workspace.list_files().unwrap(),
            vec![PathBuf::from("a.txt"), PathBuf::from("nested/b.txt")]
        );
    }

    #[test]
    fn relative_path_rejects_escapes_and_metadata() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().into());

        assert_eq!(
            workspace.relative_path("./dir/wug.txt").unwrap(),
            PathBuf::from("dir/wug.txt")
        );
        assert!(workspace.relative_path("../wug.txt").is_err());
        assert!(workspace.relative_path(".gitlet/blobs/x").is_err());
        let absolute = dir.path().join("wug.txt");
        assert_eq!(
            workspace.relative_path(absolute.to_str().unwrap()).unwrap(),
            PathBuf::from("wug.txt")
        );
    }

    #[test]
    fn write_creates_parents_and_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().into());
        let path = Path::new("deep/dir/wug.txt");

        workspace.write_file(path, b"a").unwrap();
        assert_eq!(workspace.read_file(path).unwrap().as_ref(), b"a");

        workspace.remove_file(path).unwrap();
        workspace.remove_file(path).unwrap();
        assert!(!workspace.is_file(path));
    }
}
