use crate::areas::repository::Repository;
use crate::areas::staging::StagingArea;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: BranchName,
    pub(crate) branches: Vec<BranchName>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, staging: &StagingArea) -> anyhow::Result<StatusInfo> {
        let branches = self
            .repository
            .refs()
            .list_branches()?
            .into_iter()
            .map(|branch| branch.name().clone())
            .collect::<Vec<_>>();

        let workspace_files = self.repository.workspace().list_files()?;
        let mut workspace_oids = BTreeMap::<PathBuf, ObjectId>::new();
        for path in &workspace_files {
            workspace_oids.insert(path.clone(), self.hash_workspace_file(path)?);
        }

        let mut workspace_changeset = ChangeSet::new();
        self.check_head_files(staging, &workspace_oids, &mut workspace_changeset);
        self.check_staged_files(staging, &workspace_oids, &mut workspace_changeset);

        let untracked_files = workspace_files
            .into_iter()
            .filter(|path| {
                staging.is_staged_for_removal(path)
                    || (!staging.is_staged_for_addition(path) && !staging.head().tracks(path))
            })
            .collect::<FileSet>();

        Ok(StatusInfo {
            current_branch: staging.branch().name().clone(),
            branches,
            staged_files: staging.additions().keys().cloned().collect(),
            removed_files: staging.removals().keys().cloned().collect(),
            workspace_changeset,
            untracked_files,
        })
    }

    fn hash_workspace_file(&self, path: &Path) -> anyhow::Result<ObjectId> {
        let data = self.repository.workspace().read_file(path)?;
        Blob::new(data).object_id()
    }

    // tracked by head, untouched by staging, yet changed on disk
    fn check_head_files(
        &self,
        staging: &StagingArea,
        workspace_oids: &BTreeMap<PathBuf, ObjectId>,
        changeset: &mut ChangeSet,
    ) {
        for (path, head_oid) in staging.head().files() {
            if staging.is_staged_for_addition(path) || staging.is_staged_for_removal(path) {
                continue;
            }

            match workspace_oids.get(path) {
                Some(oid) if oid != head_oid => {
                    changeset.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
                None => {
                    changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
            }
        }
    }

    // staged for addition but changed again since
    fn check_staged_files(
        &self,
        staging: &StagingArea,
        workspace_oids: &BTreeMap<PathBuf, ObjectId>,
        changeset: &mut ChangeSet,
    ) {
        for (path, staged_oid) in staging.additions() {
            match workspace_oids.get(path) {
                Some(oid) if oid != staged_oid => {
                    changeset.insert(path.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
                None => {
                    changeset.insert(path.clone(), WorkspaceChangeType::Deleted);
                }
            }
        }
    }
}
