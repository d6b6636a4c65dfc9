//! Command implementations
//!
//! Every user-facing command lives in `porcelain`, one file per command (or per
//! family of closely related commands), each adding methods to `Repository`.

pub mod porcelain;
