//! Directory tree on disk

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::{child_path, EntryKind, RepoEntry, Repository};
use crate::error::{CwlError, Result};
use crate::location::RepoLocation;

/// Serves a local checkout. Revision pins are ignored: the working tree is
/// the only revision there is.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a repository path onto the file system, refusing to leave the root
    fn resolve(&self, location: &RepoLocation) -> Result<PathBuf> {
        let relative = Path::new(&location.path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(CwlError::InvalidLocation {
                input: location.path.clone(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl Repository for LocalRepository {
    fn list_directory(&self, location: &RepoLocation) -> Result<Vec<RepoEntry>> {
        let dir = self.resolve(location)?;
        if !dir.is_dir() {
            return Err(CwlError::NotFound {
                location: location.to_string(),
            });
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| CwlError::Retrieval {
                location: location.to_string(),
                reason: e.to_string(),
            })?;

            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else if entry.file_type().is_file() {
                EntryKind::File
            } else {
                debug!(path = %entry.path().display(), "skipping non-regular entry");
                continue;
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let path = child_path(&location.path, &name);
            entries.push(RepoEntry::new(name, kind, path));
        }
        Ok(entries)
    }

    fn read_file(&self, location: &RepoLocation, _revision: &str) -> Result<String> {
        let path = self.resolve(location)?;
        fs::read_to_string(&path).map_err(|e| CwlError::Retrieval {
            location: location.to_string(),
            reason: e.to_string(),
        })
    }
}
