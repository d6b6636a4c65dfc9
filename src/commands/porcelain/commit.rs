use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{GitletError, NOTHING_TO_COMMIT};
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        let staging = self.load_staging()?;

        if staging.is_clean() {
            return Err(GitletError::invalid_state(NOTHING_TO_COMMIT).into());
        }

        let author = Author::load_from_env()?;
        let head_oid = staging.branch().commit().clone();
        let mut commit = Commit::successor(staging.head(), head_oid, message, author)?;

        for path in staging.removals().keys() {
            commit.untrack(path);
        }

        for (path, blob_id) in staging.additions() {
            self.promote_blob(blob_id)?;
            commit.track(path.clone(), blob_id.clone());
        }

        let commit_id = self.commits().store(&commit)?;
        let branch = staging.branch().advance(commit_id.clone());
        self.refs().update_branch(&branch)?;

        let summary = format!(
            "[{} {}] {}",
            branch.name(),
            commit_id.to_short_oid(),
            commit.short_message()
        );
        self.reset_staging(&StagingArea::new(commit, branch))?;

        tracing::info!(oid = %commit_id, "created commit");

        writeln!(self.writer(), "{}", summary)?;

        Ok(())
    }

    // copy a staged blob from the pending area into the permanent store
    fn promote_blob(&self, blob_id: &ObjectId) -> anyhow::Result<()> {
        if self.database().contains(blob_id) {
            return Ok(());
        }

        let blob = self
            .pending()
            .parse_object_as_blob(blob_id)
            .with_context(|| format!("staged blob {} is missing", blob_id))?;
        self.database().store(&blob)?;

        Ok(())
    }
}
