//! Error taxonomy surfaced at the command boundary
//!
//! Every failure a user can trigger maps onto one of these variants. Each carries
//! the fixed message that is printed before the process exits with a non-zero status.
//! Internal plumbing keeps returning `anyhow::Result`; these values travel inside
//! `anyhow::Error` and are recovered in `main` with `downcast_ref`.

use thiserror::Error;

pub const FILE_DOES_NOT_EXIST: &str = "File does not exist.";
pub const FILE_NOT_IN_COMMIT: &str = "File does not exist in that commit.";
pub const NO_SUCH_COMMIT: &str = "No commit with that id exists.";
pub const NO_SUCH_BRANCH: &str = "No such branch exists.";
pub const NO_BRANCH_WITH_NAME: &str = "A branch with that name does not exist.";
pub const BRANCH_EXISTS: &str = "A branch with that name already exists.";
pub const CURRENT_BRANCH_CHECKOUT: &str = "No need to checkout the current branch.";
pub const CURRENT_BRANCH_REMOVAL: &str = "Cannot remove the current branch.";
pub const NO_REASON_TO_REMOVE: &str = "No reason to remove the file.";
pub const EMPTY_COMMIT_MESSAGE: &str = "Please enter a commit message.";
pub const NOTHING_TO_COMMIT: &str = "No changes added to the commit.";
pub const NO_COMMIT_WITH_MESSAGE: &str = "Found no commit with that message.";
pub const NOT_INITIALIZED: &str = "Not in an initialized Gitlet directory.";
pub const ALREADY_INITIALIZED: &str =
    "A Gitlet version-control system already exists in the current directory.";
pub const AMBIGUOUS_COMMIT_ID: &str = "Ambiguous commit id.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GitletError {
    /// A file, commit, branch or blob could not be found
    #[error("{0}")]
    NotFound(String),
    /// A required argument is missing or malformed
    #[error("{0}")]
    InvalidArgument(String),
    /// The operation makes no sense given the current staging or commit state
    #[error("{0}")]
    InvalidState(String),
    /// The repository or branch being created is already there
    #[error("{0}")]
    AlreadyExists(String),
    /// A stored record could not be decoded
    #[error("corrupt object {0}")]
    Corrupt(String),
}

impl GitletError {
    pub fn not_found(message: impl Into<String>) -> Self {
        GitletError::NotFound(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        GitletError::InvalidArgument(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        GitletError::InvalidState(message.into())
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        GitletError::AlreadyExists(message.into())
    }
}

/// Find the taxonomy value carried by an error chain, if any.
pub fn classify(error: &anyhow::Error) -> Option<&GitletError> {
    error.chain().find_map(|cause| cause.downcast_ref::<GitletError>())
}
