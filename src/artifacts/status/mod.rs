//! Working tree status inspection
//!
//! Compares the working directory against the staging area and the head commit.
//!
//! ## Components
//!
//! - `file_change`: Kinds of unstaged change and how they are labelled
//! - `status_info`: Collects every section of the status report

pub mod file_change;
pub mod status_info;
