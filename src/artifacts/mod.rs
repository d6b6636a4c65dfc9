//! Gitlet data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `branch`: Branch names and branch records
//! - `core`: Shared utilities (pager wrapper, etc.)
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, commit) and their identities
//! - `status`: Working tree status inspection

pub mod branch;
pub mod core;
pub mod log;
pub mod objects;
pub mod status;
