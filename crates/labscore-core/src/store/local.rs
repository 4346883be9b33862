//! Content store backed by a directory on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::store::{ContentStore, Entry, EntryKind, StoredFile, content_revision, join_path};

/// A directory tree, typically a local clone of the score repository.
///
/// There is no history here: a "commit" replaces the file and logs the
/// message. The revision of a file is a hash of its bytes.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::NotFound(root.display().to_string()));
        }
        Ok(Self { root })
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }

    fn url(&self, path: &str) -> String {
        format!("file://{}", self.resolve(path).display())
    }
}

fn io_error(path: &str, e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::NotFound {
        Error::NotFound(path.to_string())
    } else {
        Error::store(path, e.to_string())
    }
}

impl ContentStore for LocalStore {
    fn list_entries(&self, path: &str) -> Result<Vec<Entry>> {
        let dir = path.trim_matches('/');
        let mut entries = Vec::new();

        for item in fs::read_dir(self.resolve(dir)).map_err(|e| io_error(dir, e))? {
            let item = item.map_err(|e| io_error(dir, e))?;
            let file_type = item.file_type().map_err(|e| io_error(dir, e))?;
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                continue;
            };

            let name = item.file_name().to_string_lossy().into_owned();
            let path = join_path(dir, &name);
            entries.push(Entry {
                url: self.url(&path),
                name,
                path,
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_text(&self, path: &str) -> Result<StoredFile> {
        let path = path.trim_matches('/');
        let bytes = fs::read(self.resolve(path)).map_err(|e| io_error(path, e))?;
        let revision = content_revision(&bytes);
        let content = String::from_utf8(bytes)
            .map_err(|e| Error::Encoding(format!("{} is not UTF-8: {}", path, e)))?;

        Ok(StoredFile {
            path: path.to_string(),
            content,
            revision,
            url: self.url(path),
        })
    }

    fn write_text(
        &mut self,
        path: &str,
        message: &str,
        content: &str,
        prior_revision: Option<&str>,
    ) -> Result<String> {
        let path = path.trim_matches('/');
        let target = self.resolve(path);

        let current = match fs::read(&target) {
            Ok(bytes) => Some(content_revision(&bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(io_error(path, e)),
        };
        if current.as_deref() != prior_revision {
            return Err(Error::RevisionConflict {
                path: path.to_string(),
            });
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content).map_err(|e| io_error(path, e))?;

        let revision = content_revision(content.as_bytes());
        info!("Wrote {} ({}): {}", path, revision, message);
        Ok(revision)
    }
}
