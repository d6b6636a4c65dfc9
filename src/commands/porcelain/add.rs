use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::{FILE_DOES_NOT_EXIST, GitletError};

impl Repository {
    pub fn add(&self, file: &str) -> anyhow::Result<()> {
        let mut staging = self.load_staging()?;

        let path = self.workspace().relative_path(file)?;
        if !self.workspace().is_file(&path) {
            return Err(GitletError::not_found(FILE_DOES_NOT_EXIST).into());
        }

        let blob = Blob::new(self.workspace().read_file(&path)?);
        let blob_id = blob.object_id()?;

        if staging.head().tracked_oid(&path) == Some(&blob_id) {
            // identical to the head version: nothing left to stage for this path
            staging.reset_path(&path);
        } else {
            // the pending blob must exist before the staging area refers to it
            self.pending().store(&blob)?;
            staging.stage_addition(path.clone(), blob_id.clone());
        }

        staging.write_updates(self.staging_path())?;

        tracing::debug!(path = %path.display(), oid = %blob_id, "staged file");

        Ok(())
    }
}
