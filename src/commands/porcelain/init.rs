use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::errors::{ALREADY_INITIALIZED, GitletError};
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.gitlet_path().exists() {
            return Err(GitletError::already_exists(ALREADY_INITIALIZED).into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .gitlet/blobs directory")?;

        fs::create_dir_all(self.commits().objects_path())
            .context("Failed to create .gitlet/commits directory")?;

        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .gitlet/branches directory")?;

        fs::create_dir_all(self.pending().objects_path())
            .context("Failed to create .gitlet/staging/blobs_to_add directory")?;

        let initial_commit = Commit::initial();
        let initial_oid = self
            .commits()
            .store(&initial_commit)
            .context("Failed to store the initial commit")?;

        let master = self
            .refs()
            .create_branch(BranchName::default_branch(), initial_oid)
            .context("Failed to create the default branch")?;

        // the staging file is written last: its presence marks the repository as usable
        StagingArea::new(initial_commit, master)
            .write_updates(self.staging_path())
            .context("Failed to create .gitlet/staging/stagingarea.json")?;

        tracing::info!(path = %self.path().display(), "initialized repository");

        writeln!(
            self.writer(),
            "Initialized empty Gitlet repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
