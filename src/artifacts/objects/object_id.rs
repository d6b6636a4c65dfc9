//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They name every file in
//! the content stores (`blobs/`, `commits/`, `staging/blobs_to_add/`).
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc1234")

use crate::artifacts::objects::object::sha1_hex;
use crate::artifacts::objects::{MIN_PREFIX_LENGTH, OBJECT_ID_LENGTH};
use serde::{Deserialize, Serialize};

/// Object identifier (SHA-1 hash)
///
/// Always holds a validated, lowercase 40-character hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !Self::is_hex(&id) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash arbitrary bytes into an object ID
    pub fn hash(content: &[u8]) -> Self {
        Self(sha1_hex(content))
    }

    /// Check whether `prefix` could abbreviate an object ID
    pub fn is_valid_prefix(prefix: &str) -> bool {
        (MIN_PREFIX_LENGTH..=OBJECT_ID_LENGTH).contains(&prefix.len()) && Self::is_hex(prefix)
    }

    fn is_hex(value: &str) -> bool {
        value.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get abbreviated form of the object ID
    ///
    /// # Returns
    ///
    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(value)
    }
}

impl From<ObjectId> for String {
    fn from(oid: ObjectId) -> Self {
        oid.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn hashing_is_deterministic(content in proptest::collection::vec(proptest::num::u8::ANY, 0..512)) {
            assert_eq!(ObjectId::hash(&content), ObjectId::hash(&content));
        }

        #[test]
        fn hashes_parse_back(content in proptest::collection::vec(proptest::num::u8::ANY, 0..512)) {
            let oid = ObjectId::hash(&content);
            assert_eq!(ObjectId::try_parse(oid.to_string()).unwrap(), oid);
        }

        #[test]
        fn rejects_non_hex_ids(id in "[g-z]{40}") {
            assert!(ObjectId::try_parse(id).is_err());
        }
    }

    #[test]
    fn hash_of_empty_content_matches_sha1() {
        assert_eq!(
            ObjectId::hash(b"").as_ref(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(ObjectId::try_parse("abc".to_string()).is_err());
    }

    #[test]
    fn prefixes_need_four_hex_chars() {
        assert!(ObjectId::is_valid_prefix("da39"));
        assert!(!ObjectId::is_valid_prefix("da3"));
        assert!(!ObjectId::is_valid_prefix("master"));
    }

    #[test]
    fn short_oid_is_seven_chars() {
        assert_eq!(ObjectId::hash(b"").to_short_oid(), "da39a3e");
    }
}
