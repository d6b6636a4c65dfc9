//! Branch pointers
//!
//! Every branch is a file under `branches/` named after the branch and containing
//! the 40-character ID of the commit it points to.
//!
//! ## Invariant
//!
//! A branch file is only ever written with the ID of a commit that is already in the
//! commit store, so a branch always resolves.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::record::Branch;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{BRANCH_EXISTS, GitletError, NO_BRANCH_WITH_NAME};
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Branch pointer manager
///
/// Reads and writes branch files, taking file locks around each access.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the branches directory (typically `.gitlet/branches`)
    path: Box<Path>,
}

impl Refs {
    pub fn branches_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, name: &BranchName) -> bool {
        self.path.join(name.as_ref()).is_file()
    }

    /// Read the branch record for `name`, if such a branch exists
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<Branch>> {
        let branch_path = self.path.join(name.as_ref());
        if !branch_path.is_file() {
            return Ok(None);
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .open(&branch_path)
            .with_context(|| format!("failed to open branch file at {:?}", branch_path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;
        let oid = ObjectId::try_parse(content.trim().to_string())
            .with_context(|| format!("branch file at {:?} is malformed", branch_path))?;

        Ok(Some(Branch::new(name.clone(), oid)))
    }

    /// Create a new branch pointing at `oid`
    ///
    /// Fails with `AlreadyExists` if a branch with the same name is present.
    pub fn create_branch(&self, name: BranchName, oid: ObjectId) -> anyhow::Result<Branch> {
        if self.exists(&name) {
            return Err(GitletError::already_exists(BRANCH_EXISTS).into());
        }

        let branch = Branch::new(name, oid);
        self.update_branch(&branch)?;

        Ok(branch)
    }

    /// Point an existing or new branch at the commit recorded in `branch`
    pub fn update_branch(&self, branch: &Branch) -> anyhow::Result<()> {
        let branch_path = self.path.join(branch.name().as_ref());

        // names like `feature/x` live in nested directories
        let parent = branch_path
            .parent()
            .with_context(|| format!("branch file at {:?} has no parent", branch_path))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create branch directory at {:?}", parent))?;

        // open the ref file as WRONLY and CREAT to write commit_id to it
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&branch_path)
            .with_context(|| format!("failed to open branch file at {:?}", branch_path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut()
            .write_all(branch.commit().as_ref().as_bytes())?;

        tracing::debug!(branch = %branch.name(), commit = %branch.commit(), "moved branch");

        Ok(())
    }

    /// Delete the branch pointer; the commits it pointed at are kept
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<Branch> {
        let branch = self
            .read_branch(name)?
            .ok_or_else(|| GitletError::not_found(NO_BRANCH_WITH_NAME))?;

        let branch_path = self.path.join(name.as_ref());
        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_empty_parents(&branch_path);

        tracing::debug!(branch = %name, "deleted branch");

        Ok(branch)
    }

    // stops at the first directory that still holds other branches
    fn prune_empty_parents(&self, branch_path: &Path) {
        let mut dir = branch_path.parent();
        while let Some(current) = dir {
            if current == &*self.path || std::fs::remove_dir(current).is_err() {
                break;
            }
            dir = current.parent();
        }
    }

    /// Every branch, sorted by name
    ///
    /// Nested branch files are named by their path relative to `branches/`.
    pub fn list_branches(&self) -> anyhow::Result<Vec<Branch>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.path).min_depth(1) {
            let entry =
                entry.with_context(|| format!("failed to list branches at {:?}", self.path))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.path)
                .with_context(|| format!("branch file {:?} is outside {:?}", entry.path(), self.path))?;
            let name = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if let Ok(name) = BranchName::try_parse(name) {
                names.push(name);
            }
        }
        names.sort();

        names
            .iter()
            .filter_map(|name| self.read_branch(name).transpose())
            .collect()
    }
}
