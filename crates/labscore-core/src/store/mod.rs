//! Content store abstraction.
//!
//! The summary job only needs three operations from the place the logs live:
//! list a directory, read a text file, and replace a text file conditionally
//! on its previous revision. `ContentStore` captures those, so the driver
//! runs the same against GitHub, a local checkout, or an in-memory tree.

mod github;
mod local;
mod memory;

pub use github::GitHubStore;
pub use local::LocalStore;
pub use memory::{Commit, MemoryStore};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use strum::Display;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// A directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Path from the store root, `/`-separated.
    pub path: String,
    pub kind: EntryKind,
    /// Browsable location of the entry.
    pub url: String,
}

impl Entry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Dot-prefixed entries (`.github`, `.gitignore`, ...).
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// A text file together with the revision it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: String,
    pub content: String,
    /// Opaque marker to pass back to `write_text`.
    pub revision: String,
    pub url: String,
}

pub trait ContentStore {
    /// List the entries directly under `path` (`""` is the root), sorted by name.
    fn list_entries(&self, path: &str) -> Result<Vec<Entry>>;

    /// Read a text file.
    fn read_text(&self, path: &str) -> Result<StoredFile>;

    /// Replace the content of `path` and record `message` as the change
    /// description.
    ///
    /// `prior_revision` must be the revision the caller last read; `None`
    /// creates the file and fails if it already exists. A stale revision
    /// fails with `Error::RevisionConflict`. Returns the new revision.
    fn write_text(
        &mut self,
        path: &str,
        message: &str,
        content: &str,
        prior_revision: Option<&str>,
    ) -> Result<String>;
}

/// Join a directory path and an entry name with `/`.
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Revision marker for stores that don't have their own: hex SHA-256 of the content.
pub fn content_revision(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "README.md"), "README.md");
        assert_eq!(join_path("g1", "a.md"), "g1/a.md");
        assert_eq!(join_path("g1/", "a.md"), "g1/a.md");
    }

    #[test]
    fn test_content_revision_tracks_content() {
        assert_eq!(content_revision(b"abc"), content_revision(b"abc"));
        assert_ne!(content_revision(b"abc"), content_revision(b"abd"));
        assert_eq!(
            content_revision(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            content_revision(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_entry_flags() {
        let entry = Entry {
            name: ".github".to_string(),
            path: ".github".to_string(),
            kind: EntryKind::Dir,
            url: String::new(),
        };
        assert!(entry.is_dir());
        assert!(!entry.is_file());
        assert!(entry.is_hidden());
        assert_eq!(entry.kind.to_string(), "dir");
    }
}
