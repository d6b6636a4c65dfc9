//! Commit object
//!
//! Commits are immutable snapshots of the tracked files. They contain:
//! - The parent commit ID (absent for the root commit)
//! - Author information (name, email, timestamp)
//! - The commit message
//! - The snapshot: every tracked path mapped to the blob holding its content
//!
//! ## Format
//!
//! On disk and for hashing:
//! ```text
//! commit <size>\0
//! format 1
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! file <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! The encoding is canonical: fields always appear in this order and the snapshot is
//! written in ascending path order, so equal commits always hash to the same ID.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{EMPTY_COMMIT_MESSAGE, GitletError};
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

/// Version of the canonical commit encoding
pub const COMMIT_FORMAT_VERSION: u32 = 1;

const ROOT_AUTHOR_NAME: &str = "gitlet";
const ROOT_AUTHOR_EMAIL: &str = "gitlet@localhost";
const ROOT_MESSAGE: &str = "initial commit";

/// Author information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// The fixed identity stamped on every root commit
    pub fn root() -> Self {
        Author::new_with_timestamp(
            ROOT_AUTHOR_NAME.to_string(),
            ROOT_AUTHOR_EMAIL.to_string(),
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
        )
    }

    /// Load author information from environment variables
    ///
    /// Reads GITLET_AUTHOR_NAME, GITLET_AUTHOR_EMAIL and optionally GITLET_AUTHOR_DATE.
    /// The name falls back to the login name, the email to `<name>@localhost`, and the
    /// date to the current time.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("GITLET_AUTHOR_NAME")
            .or_else(|_| std::env::var("USER"))
            .or_else(|_| std::env::var("USERNAME"))
            .map(|name| Self::sanitize(&name))
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "anonymous".to_string());
        let email = std::env::var("GITLET_AUTHOR_EMAIL")
            .map(|email| Self::sanitize(&email))
            .ok()
            .filter(|email| !email.is_empty())
            .unwrap_or_else(|| format!("{}@localhost", name.replace(' ', ".")));

        match std::env::var("GITLET_AUTHOR_DATE") {
            Ok(date_str) => {
                let timestamp = DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .with_context(|| format!("GITLET_AUTHOR_DATE is not a valid date: {date_str}"))?;
                Ok(Author::new_with_timestamp(name, email, timestamp))
            }
            Err(_) => Ok(Author::new(name, email)),
        }
    }

    // angle brackets and newlines would break the author line
    fn sanitize(value: &str) -> String {
        value.replace(['<', '>', '\n', '\r'], "").trim().to_string()
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Format complete author info including timestamp
    ///
    /// # Returns
    ///
    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 01 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %d %H:%M:%S %Y %z").to_string()
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Format: "name <email> timestamp timezone"
        // Split from right to get timezone and timestamp first
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid author format"));
        }

        let timezone = parts[0];
        let timestamp = parts[1];
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '>'"))?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let timestamp = DateTime::parse_from_str(&format!("{timestamp} {timezone}"), "%s %z")
            .map_err(|_| anyhow::anyhow!("Invalid timestamp or timezone"))?;

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Commit object
///
/// Represents a snapshot of the tracked files with metadata. The snapshot is an
/// ordered map so printing and hashing never depend on insertion order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Parent commit ID (None only for the root commit)
    parent: Option<ObjectId>,
    /// Author who recorded the snapshot
    author: Author,
    /// Commit message
    message: String,
    /// Tracked file path -> blob ID
    files: BTreeMap<PathBuf, ObjectId>,
}

impl Commit {
    /// The root commit every repository starts from
    pub fn initial() -> Self {
        Commit {
            parent: None,
            author: Author::root(),
            message: ROOT_MESSAGE.to_string(),
            files: BTreeMap::new(),
        }
    }

    /// Start a successor of `parent`, inheriting its snapshot verbatim
    ///
    /// # Arguments
    ///
    /// * `parent` - The current head commit
    /// * `parent_oid` - Identity of `parent`
    /// * `message` - Commit message, must not be blank
    /// * `author` - Who is committing, and when
    pub fn successor(
        parent: &Commit,
        parent_oid: ObjectId,
        message: &str,
        author: Author,
    ) -> anyhow::Result<Self> {
        if message.trim().is_empty() {
            return Err(GitletError::invalid_argument(EMPTY_COMMIT_MESSAGE).into());
        }

        Ok(Commit {
            parent: Some(parent_oid),
            author,
            message: message.to_string(),
            files: parent.files.clone(),
        })
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.files
    }

    /// Blob tracked for `path` in this snapshot
    pub fn tracked_oid(&self, path: &Path) -> Option<&ObjectId> {
        self.files.get(path)
    }

    pub fn tracks(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub(crate) fn track(&mut self, path: PathBuf, oid: ObjectId) {
        self.files.insert(path, oid);
    }

    pub(crate) fn untrack(&mut self, path: &Path) -> Option<ObjectId> {
        self.files.remove(path)
    }

    fn encode_body(&self) -> anyhow::Result<String> {
        let mut lines = vec![format!("format {}", COMMIT_FORMAT_VERSION)];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("author {}", self.author.display()));
        for (path, oid) in &self.files {
            let path = path
                .to_str()
                .filter(|path| !path.contains('\n'))
                .with_context(|| format!("Unsupported file name in snapshot: {:?}", path))?;
            lines.push(format!("file {} {}", oid.as_ref(), path));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        Ok(lines.join("\n"))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self.encode_body()?;

        let mut commit_bytes = Vec::new();
        let header = format!("commit {}\0", content.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(content.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut header = Vec::new();
        reader.read_until(b'\0', &mut header)?;
        let header = String::from_utf8(header)?;
        let size = header
            .strip_prefix("commit ")
            .and_then(|rest| rest.strip_suffix('\0'))
            .context("Invalid commit object: missing header")?
            .parse::<usize>()
            .context("Invalid commit object: invalid size")?;

        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        if content.len() != size {
            anyhow::bail!(
                "Invalid commit object: expected {} bytes, found {}",
                size,
                content.len()
            );
        }

        let (fields, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        // `lines()` would also eat a `\r` ending a tracked path
        let mut lines = fields.split('\n');

        let version = lines
            .next()
            .and_then(|line| line.strip_prefix("format "))
            .context("Invalid commit object: missing format line")?
            .parse::<u32>()
            .context("Invalid commit object: invalid format line")?;
        if version != COMMIT_FORMAT_VERSION {
            anyhow::bail!("Unsupported commit format version: {}", version);
        }

        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing author line")?;

        let parent = match next_line.strip_prefix("parent ") {
            Some(parent_oid) => {
                let parent = ObjectId::try_parse(parent_oid.to_string())?;
                next_line = lines
                    .next()
                    .context("Invalid commit object: missing author line")?;
                Some(parent)
            }
            None => None,
        };

        let author = next_line
            .strip_prefix("author ")
            .context("Invalid commit object: invalid author line")?;
        let author = Author::try_from(author)?;

        let files = lines
            .map(|line| {
                let (oid, path) = line
                    .strip_prefix("file ")
                    .and_then(|entry| entry.split_once(' '))
                    .context("Invalid commit object: invalid file line")?;
                Ok((PathBuf::from(path), ObjectId::try_parse(oid.to_string())?))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        Ok(Commit {
            parent,
            author,
            message: message.to_string(),
            files,
        })
    }
}

impl Object for Commit {
    fn display(&self) -> String {
        self.encode_body().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GitletError;
    use pretty_assertions::assert_eq;
    use proptest::proptest;
    use std::io::Cursor;

    fn fixed_author() -> Author {
        Author::new_with_timestamp(
            "fake_user".to_string(),
            "fake_email@email.com".to_string(),
            DateTime::parse_from_str("2023-01-01 12:00:00 +0200", "%Y-%m-%d %H:%M:%S %z").unwrap(),
        )
    }

    fn sample_commit() -> Commit {
        let root = Commit::initial();
        let mut commit = Commit::successor(
            &root,
            root.object_id().unwrap(),
            "added wug",
            fixed_author(),
        )
        .unwrap();
        commit.track(PathBuf::from("wug.txt"), ObjectId::hash(b"a"));
        commit.track(PathBuf::from("dir/notwug.txt"), ObjectId::hash(b"b"));
        commit
    }

    #[test]
    fn initial_commit_identity_is_fixed() {
        assert_eq!(
            Commit::initial().object_id().unwrap(),
            Commit::initial().object_id().unwrap()
        );
        assert!(Commit::initial().parent().is_none());
        assert!(Commit::initial().files().is_empty());
    }

    #[test]
    fn successor_inherits_snapshot_and_points_at_parent() {
        let parent = sample_commit();
        let parent_oid = parent.object_id().unwrap();
        let child = Commit::successor(&parent, parent_oid.clone(), "next", fixed_author()).unwrap();

        assert_eq!(child.parent(), Some(&parent_oid));
        assert_eq!(child.files(), parent.files());
    }

    #[test]
    fn successor_rejects_blank_message() {
        let root = Commit::initial();
        let error = Commit::successor(&root, root.object_id().unwrap(), "  ", fixed_author())
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<GitletError>(),
            Some(&GitletError::InvalidArgument(EMPTY_COMMIT_MESSAGE.to_string()))
        );
    }

    #[test]
    fn encoding_round_trips() {
        let commit = sample_commit();
        let bytes = Packable::serialize(&commit).unwrap();
        let decoded = <Commit as Unpackable>::deserialize(Cursor::new(bytes.to_vec())).unwrap();

        assert_eq!(decoded, commit);
        assert_eq!(decoded.object_id().unwrap(), commit.object_id().unwrap());
    }

    #[test]
    fn paths_with_carriage_returns_round_trip() {
        let mut commit = sample_commit();
        commit.track(PathBuf::from("a\r"), ObjectId::hash(b"c"));
        commit.track(PathBuf::from("b\r\rc"), ObjectId::hash(b"d"));

        let decoded = <Commit as Unpackable>::deserialize(Cursor::new(Packable::serialize(&commit).unwrap().to_vec())).unwrap();

        assert_eq!(decoded.tracked_oid(Path::new("a\r")), Some(&ObjectId::hash(b"c")));
        assert_eq!(decoded, commit);
        assert_eq!(decoded.object_id().unwrap(), commit.object_id().unwrap());
    }

    #[test]
    fn message_is_kept_exactly_as_given() {
        let root = Commit::initial();
        let commit =
            Commit::successor(&root, root.object_id().unwrap(), "  x  \n", fixed_author()).unwrap();
        assert_eq!(commit.message(), "  x  \n");

        let decoded = <Commit as Unpackable>::deserialize(Cursor::new(Packable::serialize(&commit).unwrap().to_vec())).unwrap();
        assert_eq!(decoded.message(), "  x  \n");
    }

    #[test]
    fn encoding_lists_files_in_path_order() {
        let display = sample_commit().display();
        let dir_pos = display.find("file ").unwrap();

        assert!(display[dir_pos..].starts_with(&format!(
            "file {} dir/notwug.txt",
            ObjectId::hash(b"b")
        )));
    }

    #[test]
    fn root_date_is_epoch() {
        assert_eq!(
            Commit::initial().author().readable_timestamp(),
            "Thu Jan 01 00:00:00 1970 +0000"
        );
    }

    #[test]
    fn author_round_trips_with_offset() {
        let author = fixed_author();
        assert_eq!(Author::try_from(author.display().as_str()).unwrap(), author);
    }

    proptest! {
        #[test]
        fn identity_depends_only_on_fields(message in "[a-zA-Z0-9 ]{1,40}", content in "[a-z]{0,20}") {
            let build = || {
                let root = Commit::initial();
                let mut commit = Commit::successor(&root, root.object_id().unwrap(), &message, fixed_author());
                if let Ok(commit) = commit.as_mut() {
                    commit.track(PathBuf::from("f.txt"), ObjectId::hash(content.as_bytes()));
                }
                commit
            };

            match (build(), build()) {
                (Ok(first), Ok(second)) => assert_eq!(first.object_id().unwrap(), second.object_id().unwrap()),
                (first, second) => assert_eq!(first.is_err(), second.is_err()),
            }
        }
    }
}
