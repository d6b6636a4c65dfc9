use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::errors::{GitletError, NOT_INITIALIZED};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the metadata directory at the repository root
pub const GITLET_DIR: &str = ".gitlet";

const BLOBS_DIR: &str = "blobs";
const BRANCHES_DIR: &str = "branches";
const COMMITS_DIR: &str = "commits";
const COMMIT_EXTENSION: &str = "commit";
const STAGING_DIR: &str = "staging";
const PENDING_BLOBS_DIR: &str = "blobs_to_add";
const STAGING_FILE: &str = "stagingarea.json";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    pending: Database,
    commits: Database,
    refs: Refs,
    workspace: Workspace,
    staging_path: Box<Path>,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path)
            .canonicalize()
            .with_context(|| format!("unable to resolve repository root {path}"))?;
        let gitlet_path = path.join(GITLET_DIR);
        let staging_dir = gitlet_path.join(STAGING_DIR);

        let database = Database::new(gitlet_path.join(BLOBS_DIR).into_boxed_path());
        let pending = Database::new(staging_dir.join(PENDING_BLOBS_DIR).into_boxed_path());
        let commits = Database::with_extension(
            gitlet_path.join(COMMITS_DIR).into_boxed_path(),
            COMMIT_EXTENSION,
        );
        let refs = Refs::new(gitlet_path.join(BRANCHES_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            pending,
            commits,
            refs,
            workspace,
            staging_path: staging_dir.join(STAGING_FILE).into_boxed_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> PathBuf {
        self.path.join(GITLET_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Permanent blob store
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Blobs staged for addition but not yet committed
    pub fn pending(&self) -> &Database {
        &self.pending
    }

    pub fn commits(&self) -> &Database {
        &self.commits
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn staging_path(&self) -> &Path {
        &self.staging_path
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir() && self.staging_path.is_file()
    }

    /// Load the staging area, failing if there is no repository here
    pub fn load_staging(&self) -> anyhow::Result<StagingArea> {
        if !self.is_initialized() {
            return Err(GitletError::invalid_state(NOT_INITIALIZED).into());
        }

        StagingArea::rehydrate(&self.staging_path)
    }

    /// Persist a replacement staging area and drop pending blobs it no longer refers to
    ///
    /// Only called with a clean staging area, so nothing references the pending store
    /// once the new state is on disk.
    pub fn reset_staging(&self, staging: &StagingArea) -> anyhow::Result<()> {
        staging.write_updates(&self.staging_path)?;

        let purged = self.pending.purge()?;
        tracing::debug!(purged, "cleared pending blobs");

        Ok(())
    }
}
