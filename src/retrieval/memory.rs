//! In-memory repository

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{child_path, EntryKind, RepoEntry, Repository};
use crate::error::{CwlError, Result};
use crate::location::RepoLocation;

/// Files held in memory, keyed by slash-separated path.
///
/// Directories are implied by file paths. Every read is recorded together
/// with the revision it was pinned to.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    files: BTreeMap<String, String>,
    reads: RefCell<Vec<(String, String)>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder style)
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path: String = path.into();
        self.files.insert(path.trim_matches('/').to_string(), content.into());
    }

    /// `(path, revision)` of every read so far, in order
    pub fn reads(&self) -> Vec<(String, String)> {
        self.reads.borrow().clone()
    }
}

impl Repository for MemoryRepository {
    fn list_directory(&self, location: &RepoLocation) -> Result<Vec<RepoEntry>> {
        let dir = location.path.trim_matches('/');
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };

        // BTreeMap keeps listings sorted by name
        let mut children: BTreeMap<&str, EntryKind> = BTreeMap::new();
        for path in self.files.keys() {
            let Some(rest) = path.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((subdir, _)) => {
                    children.insert(subdir, EntryKind::Directory);
                }
                None => {
                    children.entry(rest).or_insert(EntryKind::File);
                }
            }
        }

        if children.is_empty() && !dir.is_empty() {
            return Err(CwlError::NotFound {
                location: location.to_string(),
            });
        }

        Ok(children
            .into_iter()
            .map(|(name, kind)| RepoEntry::new(name, kind, child_path(dir, name)))
            .collect())
    }

    fn read_file(&self, location: &RepoLocation, revision: &str) -> Result<String> {
        let path = location.path.trim_matches('/');
        let content = self.files.get(path).cloned().ok_or_else(|| CwlError::NotFound {
            location: location.to_string(),
        })?;
        self.reads
            .borrow_mut()
            .push((path.to_string(), revision.to_string()));
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> MemoryRepository {
        MemoryRepository::new()
            .with_file("main.cwl", "class: Workflow")
            .with_file("tools/sort.cwl", "class: CommandLineTool")
            .with_file("tools/extra/cut.cwl", "class: CommandLineTool")
    }

    #[test]
    fn lists_direct_children_only() {
        let repo = repo();
        let root = repo.list_directory(&RepoLocation::local("")).unwrap();
        assert_eq!(
            root,
            vec![
                RepoEntry::new("main.cwl", EntryKind::File, "main.cwl"),
                RepoEntry::new("tools", EntryKind::Directory, "tools"),
            ]
        );

        let tools = repo.list_directory(&RepoLocation::local("tools")).unwrap();
        assert_eq!(
            tools,
            vec![
                RepoEntry::new("extra", EntryKind::Directory, "tools/extra"),
                RepoEntry::new("sort.cwl", EntryKind::File, "tools/sort.cwl"),
            ]
        );
    }

    #[test]
    fn records_pinned_reads() {
        let repo = repo();
        let content = repo
            .read_file(&RepoLocation::local("tools/sort.cwl"), "abc123")
            .unwrap();
        assert_eq!(content, "class: CommandLineTool");
        assert_eq!(repo.reads(), vec![("tools/sort.cwl".to_string(), "abc123".to_string())]);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let repo = repo();
        assert!(matches!(
            repo.read_file(&RepoLocation::local("missing.cwl"), "HEAD"),
            Err(CwlError::NotFound { .. })
        ));
        assert!(matches!(
            repo.list_directory(&RepoLocation::local("docs")),
            Err(CwlError::NotFound { .. })
        ));
    }
}
