//! Stored object types and operations
//!
//! Everything the repository persists by content hash is an object:
//!
//! - **Blob**: raw bytes of one file version
//! - **Commit**: snapshot of tracked paths plus author, message and parent
//!
//! Identity is always the SHA-1 of the object's serialized form, so two objects with
//! equal fields share one identity.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest prefix accepted when resolving abbreviated object IDs
pub const MIN_PREFIX_LENGTH: usize = 4;
