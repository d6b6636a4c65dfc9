use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{
    AMBIGUOUS_COMMIT_ID, CURRENT_BRANCH_CHECKOUT, FILE_NOT_IN_COMMIT, GitletError,
    NO_SUCH_BRANCH, NO_SUCH_COMMIT,
};
use std::path::Path;

impl Repository {
    /// Restore `file` to its version in the head commit
    pub fn checkout_file(&self, file: &str) -> anyhow::Result<()> {
        let staging = self.load_staging()?;
        self.restore_from_commit(staging.head(), file)
    }

    /// Restore `file` to its version in the commit named by `revision`
    ///
    /// `revision` may be a full commit ID or any unambiguous prefix of one.
    pub fn checkout_commit_file(&self, revision: &str, file: &str) -> anyhow::Result<()> {
        self.load_staging()?;
        let (_, commit) = self.resolve_commit(revision)?;
        self.restore_from_commit(&commit, file)
    }

    /// Switch to `name`, writing every file of its head commit into the working tree
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        let staging = self.load_staging()?;

        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| GitletError::not_found(NO_SUCH_BRANCH))?;
        let branch = self
            .refs()
            .read_branch(&branch_name)?
            .ok_or_else(|| GitletError::not_found(NO_SUCH_BRANCH))?;

        if branch.commit() == staging.branch().commit() {
            return Err(GitletError::invalid_state(CURRENT_BRANCH_CHECKOUT).into());
        }

        let commit = self.commits().parse_object_as_commit(branch.commit())?;
        for (path, blob_id) in commit.files() {
            self.restore_file(path, blob_id)?;
        }

        tracing::info!(branch = %branch.name(), oid = %branch.commit(), "checked out branch");

        self.reset_staging(&StagingArea::new(commit, branch))
    }

    fn resolve_commit(&self, revision: &str) -> anyhow::Result<(ObjectId, Commit)> {
        if !ObjectId::is_valid_prefix(revision) {
            return Err(GitletError::not_found(NO_SUCH_COMMIT).into());
        }

        let mut candidates = self.commits().find_objects_by_prefix(revision)?;
        let commit_oid = match candidates.len() {
            0 => return Err(GitletError::not_found(NO_SUCH_COMMIT).into()),
            1 => candidates.remove(0),
            _ => return Err(GitletError::invalid_argument(AMBIGUOUS_COMMIT_ID).into()),
        };
        let commit = self.commits().parse_object_as_commit(&commit_oid)?;

        Ok((commit_oid, commit))
    }

    fn restore_from_commit(&self, commit: &Commit, file: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(file)?;
        let blob_id = commit
            .tracked_oid(&path)
            .ok_or_else(|| GitletError::not_found(FILE_NOT_IN_COMMIT))?;

        self.restore_file(&path, blob_id)
    }

    fn restore_file(&self, path: &Path, blob_id: &ObjectId) -> anyhow::Result<()> {
        let blob = self.database().parse_object_as_blob(blob_id)?;
        self.workspace().write_file(path, blob.content())?;

        tracing::debug!(path = %path.display(), oid = %blob_id, "restored file");

        Ok(())
    }
}
