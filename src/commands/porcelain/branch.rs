use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{CURRENT_BRANCH_REMOVAL, GitletError, NO_BRANCH_WITH_NAME};

impl Repository {
    /// Create a branch pointing at the head commit; the checked-out branch stays put
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        let staging = self.load_staging()?;
        let branch_name = BranchName::try_parse(name.to_string())?;

        let branch = self
            .refs()
            .create_branch(branch_name, staging.branch().commit().clone())?;

        tracing::info!(branch = %branch.name(), oid = %branch.commit(), "created branch");

        Ok(())
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        let staging = self.load_staging()?;
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| GitletError::not_found(NO_BRANCH_WITH_NAME))?;

        if !self.refs().exists(&branch_name) {
            return Err(GitletError::not_found(NO_BRANCH_WITH_NAME).into());
        }

        if staging.branch().name() == &branch_name {
            return Err(GitletError::invalid_state(CURRENT_BRANCH_REMOVAL).into());
        }

        let branch = self.refs().delete_branch(&branch_name)?;

        tracing::info!(branch = %branch.name(), oid = %branch.commit(), "removed branch");

        Ok(())
    }
}
