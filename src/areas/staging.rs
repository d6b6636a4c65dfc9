//! Staging area
//!
//! The staging area records what the next commit will change relative to the head
//! commit. It is loaded once at the start of a command, mutated in memory, and written
//! back once at the end.
//!
//! ## File Format
//!
//! `staging/stagingarea.json` holds:
//! - `head`: a full copy of the head commit
//! - `branch`: the checked-out branch (name + commit ID)
//! - `additions`: path -> blob ID staged for addition
//! - `removals`: path -> blob ID staged for removal
//!
//! ## Invariant
//!
//! A path is never in `additions` and `removals` at the same time. Every mutator below
//! clears the opposite map for the path it touches.

use crate::artifacts::branch::record::Branch;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{GitletError, NOT_INITIALIZED};
use anyhow::Context;
use fake::rand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Pending changes between the head commit and the next commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    /// Snapshot copy of the head commit
    head: Commit,
    /// The checked-out branch, pointing at `head`
    branch: Branch,
    /// Files staged for addition
    additions: BTreeMap<PathBuf, ObjectId>,
    /// Files staged for removal
    removals: BTreeMap<PathBuf, ObjectId>,
}

impl StagingArea {
    /// Create a clean staging area anchored at `head`
    pub fn new(head: Commit, branch: Branch) -> Self {
        StagingArea {
            head,
            branch,
            additions: BTreeMap::new(),
            removals: BTreeMap::new(),
        }
    }

    /// Load the staging area from disk
    ///
    /// Acquires a shared lock on the staging file during reading.
    pub fn rehydrate(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            return Err(GitletError::invalid_state(NOT_INITIALIZED).into());
        }

        let mut staging_file = std::fs::OpenOptions::new()
            .read(true)
            .open(path)
            .with_context(|| format!("failed to open staging area at {:?}", path))?;
        let mut lock = file_guard::lock(&mut staging_file, file_guard::Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse staging area at {:?}", path))
    }

    /// Persist the staging area, replacing whatever is on disk
    ///
    /// The new state is written to a temp file under an exclusive lock and then renamed
    /// over the old one, so readers never observe a half-written file.
    pub fn write_updates(&self, path: &Path) -> anyhow::Result<()> {
        let staging_dir = path
            .parent()
            .with_context(|| format!("invalid staging area path {:?}", path))?;
        let temp_path = staging_dir.join(format!("tmp-staging-{}", rand::random::<u32>()));

        let content = serde_json::to_vec_pretty(self).context("failed to serialize staging area")?;

        {
            let mut staging_file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("failed to open staging area at {:?}", temp_path))?;
            let mut lock =
                file_guard::lock(&mut staging_file, file_guard::Lock::Exclusive, 0, 1)?;
            lock.deref_mut().write_all(&content)?;
        }

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("failed to replace staging area at {:?}", path))?;

        tracing::debug!(
            additions = self.additions.len(),
            removals = self.removals.len(),
            "wrote staging area"
        );

        Ok(())
    }

    pub fn head(&self) -> &Commit {
        &self.head
    }

    pub fn branch(&self) -> &Branch {
        &self.branch
    }

    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.removals
    }

    /// True when there is nothing to commit
    pub fn is_clean(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn is_staged_for_addition(&self, path: &Path) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains_key(path)
    }

    /// Stage `path` with content `oid` for the next commit
    pub fn stage_addition(&mut self, path: PathBuf, oid: ObjectId) {
        self.removals.remove(&path);
        self.additions.insert(path, oid);
    }

    /// Stage `path` for removal from the next commit
    pub fn stage_removal(&mut self, path: PathBuf, oid: ObjectId) {
        self.additions.remove(&path);
        self.removals.insert(path, oid);
    }

    /// Drop the pending addition of `path`, if any
    pub fn unstage_addition(&mut self, path: &Path) -> Option<ObjectId> {
        self.additions.remove(path)
    }

    /// Forget every pending change for `path`
    pub fn reset_path(&mut self, path: &Path) {
        self.additions.remove(path);
        self.removals.remove(path);
    }
}
