use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A named, movable pointer to a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Branch {
    name: BranchName,
    commit: ObjectId,
}

impl Branch {
    pub fn name(&self) -> &BranchName {
        &self.name
    }

    pub fn commit(&self) -> &ObjectId {
        &self.commit
    }

    /// The same branch moved to `commit`
    pub fn advance(&self, commit: ObjectId) -> Self {
        Branch::new(self.name.clone(), commit)
    }
}
