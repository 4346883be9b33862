//! In-memory content store for tests and dry runs.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::store::{ContentStore, Entry, EntryKind, StoredFile, content_revision, join_path};

/// A recorded `write_text` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub path: String,
    pub message: String,
    pub revision: String,
}

/// File tree held in memory. Directories exist implicitly through the paths
/// of the files below them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, String>,
    unreadable: BTreeSet<String>,
    commits: Vec<Commit>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file without recording a commit.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files
            .insert(path.trim_matches('/').to_string(), content.to_string());
        self
    }

    /// Make `read_text` fail for `path`.
    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(path.trim_matches('/').to_string());
        self
    }

    pub fn content(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(|s| s.as_str())
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    fn url(path: &str) -> String {
        format!("memory:///{}", path)
    }
}

impl ContentStore for MemoryStore {
    fn list_entries(&self, path: &str) -> Result<Vec<Entry>> {
        let dir = path.trim_matches('/');
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };

        let mut children: BTreeMap<String, EntryKind> = BTreeMap::new();
        for file in self.files.keys() {
            let Some(rest) = file.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((sub, _)) => {
                    children.insert(sub.to_string(), EntryKind::Dir);
                }
                None => {
                    children.entry(rest.to_string()).or_insert(EntryKind::File);
                }
            }
        }

        if children.is_empty() && !dir.is_empty() {
            return Err(Error::NotFound(dir.to_string()));
        }

        Ok(children
            .into_iter()
            .map(|(name, kind)| {
                let path = join_path(dir, &name);
                Entry {
                    url: Self::url(&path),
                    name,
                    path,
                    kind,
                }
            })
            .collect())
    }

    fn read_text(&self, path: &str) -> Result<StoredFile> {
        let path = path.trim_matches('/');
        if self.unreadable.contains(path) {
            return Err(Error::store(path, "read refused"));
        }
        let content = self
            .files
            .get(path)
            .ok_or_else(|| Error::NotFound(path.to_string()))?;

        Ok(StoredFile {
            path: path.to_string(),
            content: content.clone(),
            revision: content_revision(content.as_bytes()),
            url: Self::url(path),
        })
    }

    fn write_text(
        &mut self,
        path: &str,
        message: &str,
        content: &str,
        prior_revision: Option<&str>,
    ) -> Result<String> {
        let path = path.trim_matches('/').to_string();
        let current = self
            .files
            .get(&path)
            .map(|c| content_revision(c.as_bytes()));

        if current.as_deref() != prior_revision {
            return Err(Error::RevisionConflict { path });
        }

        let revision = content_revision(content.as_bytes());
        self.files.insert(path.clone(), content.to_string());
        self.commits.push(Commit {
            path,
            message: message.to_string(),
            revision: revision.clone(),
        });

        Ok(revision)
    }
}
