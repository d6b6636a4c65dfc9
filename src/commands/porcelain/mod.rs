//! Porcelain commands (user-facing operations)
//!
//! Each command loads the staging area once, does its work against the repository
//! areas, and writes the staging area back at most once.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage a file for addition
//! - `rm`: Stage a file for removal
//! - `commit`: Record the staged changes as a new commit
//! - `log`: Show history (`log`, `global-log`, `find`)
//! - `status`: Show branches, staged changes and working tree state
//! - `branch`: Create or delete branches
//! - `checkout`: Restore files or switch branches

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod rm;
pub mod status;
