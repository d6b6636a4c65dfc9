//! Branch names and branch records
//!
//! - `branch_name`: validated branch names (git ref-name rules)
//! - `record`: a named pointer to a commit

pub mod record;
pub mod branch_name;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Branch created by `init` and checked out by default
pub const DEFAULT_BRANCH: &str = "master";
