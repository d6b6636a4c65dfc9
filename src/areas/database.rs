//! Content-addressed object store
//!
//! A flat directory where every file is named by the SHA-1 of its contents. The same
//! type backs the permanent blob store (`blobs/`), the pending-blob area
//! (`staging/blobs_to_add/`) and the commit store (`commits/`, with a `.commit`
//! extension).
//!
//! Objects are immutable: storing bytes that are already present is a no-op, and
//! nothing is ever rewritten in place.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = "tmp-obj-";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    extension: Option<&'static str>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            extension: None,
        }
    }

    /// Store whose object files carry `extension` (e.g. `<oid>.commit`)
    pub fn with_extension(path: Box<Path>, extension: &'static str) -> Self {
        Database {
            path,
            extension: Some(extension),
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        match self.extension {
            Some(extension) => self.path.join(format!("{}.{}", object_id, extension)),
            None => self.path.join(object_id.as_ref()),
        }
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Persist an object under its content hash
    ///
    /// Idempotent: if an object with the same ID is already present nothing is written.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = ObjectId::hash(&object_content);
        let object_path = self.object_path(&object_id);

        // write the object to disk unless it already exists
        if !object_path.exists() {
            std::fs::create_dir_all(&self.path).context(format!(
                "Unable to create object directory {}",
                self.path.display()
            ))?;

            self.write_object(object_path, object_content)?;
            tracing::debug!(oid = %object_id, store = %self.path.display(), "stored object");
        }

        Ok(object_id)
    }

    /// Read the raw bytes stored under `object_id`
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);

        if !object_path.is_file() {
            return Err(GitletError::not_found(format!("No object with id {} exists.", object_id)).into());
        }

        self.read_object(object_path)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.load(object_id)?;
        Blob::deserialize(Cursor::new(content))
    }

    /// Decode a commit and check that it still hashes to the name it is stored under
    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.load(object_id)?;
        let commit = Commit::deserialize(Cursor::new(content))
            .map_err(|error| {
                tracing::warn!(oid = %object_id, "failed to decode commit: {error:#}");
                GitletError::Corrupt(object_id.to_string())
            })?;

        if commit.object_id()? != *object_id {
            return Err(GitletError::Corrupt(object_id.to_string()).into());
        }

        Ok(commit)
    }

    /// Every object ID in the store, in ascending ID order
    pub fn list(&self) -> anyhow::Result<Vec<ObjectId>> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let mut object_ids = std::fs::read_dir(&self.path)
            .context(format!("Unable to list object directory {}", self.path.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| self.parse_file_name(&entry.file_name().to_string_lossy()))
            .collect::<Vec<_>>();
        object_ids.sort();

        Ok(object_ids)
    }

    fn parse_file_name(&self, file_name: &str) -> Option<ObjectId> {
        let stem = match self.extension {
            Some(extension) => file_name.strip_suffix(extension)?.strip_suffix('.')?,
            None => file_name,
        };

        ObjectId::try_parse(stem.to_string()).ok()
    }

    /// Find all objects whose ID starts with the given prefix.
    ///
    /// A full 40-character ID matches at most itself. If multiple matches are found,
    /// all are returned (indicating an ambiguous prefix).
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();

        Ok(self
            .list()?
            .into_iter()
            .filter(|object_id| object_id.as_ref().starts_with(&prefix))
            .collect())
    }

    /// Delete every object in the store, returning how many were removed
    pub fn purge(&self) -> anyhow::Result<usize> {
        let object_ids = self.list()?;

        for object_id in &object_ids {
            let object_path = self.object_path(object_id);
            if let Err(error) = std::fs::remove_file(&object_path) {
                tracing::warn!(path = %object_path.display(), "unable to remove object: {error}");
            }
        }

        Ok(object_ids.len())
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("{}{}", TEMP_PREFIX, rand::random::<u32>())
    }
}
