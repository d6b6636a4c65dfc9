//! Commit history traversal
//!
//! - `rev_list`: Walks the parent chain from a starting commit down to the root
//!
//! History is strictly linear: every commit has at most one parent, so the walk is a
//! plain linked-list traversal with no ordering decisions to make.

pub mod rev_list;
