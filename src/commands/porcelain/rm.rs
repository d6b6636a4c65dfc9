use crate::areas::repository::Repository;
use crate::errors::{GitletError, NO_REASON_TO_REMOVE};

impl Repository {
    pub fn rm(&self, file: &str) -> anyhow::Result<()> {
        let mut staging = self.load_staging()?;
        let path = self.workspace().relative_path(file)?;

        let tracked_oid = staging.head().tracked_oid(&path).cloned();
        if tracked_oid.is_none() && !staging.is_staged_for_addition(&path) {
            return Err(GitletError::invalid_state(NO_REASON_TO_REMOVE).into());
        }

        staging.unstage_addition(&path);

        if let Some(oid) = tracked_oid {
            staging.stage_removal(path.clone(), oid);
            self.workspace().remove_file(&path)?;
        }

        staging.write_updates(self.staging_path())?;

        tracing::debug!(path = %path.display(), "unstaged file");

        Ok(())
    }
}
