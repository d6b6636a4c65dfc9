//! Blob object
//!
//! Blobs store file content. They contain only the raw file bytes, without a
//! filename; the path lives in the snapshot mapping of the commit that tracks it.
//!
//! ## Format
//!
//! On disk and for hashing: the file bytes, verbatim

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Blob object representing one version of a file
///
/// Each unique file content is stored once, identified by the SHA-1 of its bytes.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    /// Get the raw file content
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(content.into()))
    }
}

impl Object for Blob {
    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}
