//! Core repository components
//!
//! This module contains the on-disk areas of a repository, each owning one part of the
//! `.gitlet` directory (or the working tree):
//!
//! - `database`: Content-addressed stores for blobs, pending blobs and commits
//! - `refs`: Branch pointers
//! - `repository`: Repository context tying the areas together
//! - `staging`: Staging area describing the next commit
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod workspace;
