//! Retrieval collaborator
//!
//! The collection never touches a file system or network directly. It asks a
//! [`Repository`] to enumerate one directory level at a time and to read
//! individual files at a pinned revision.
//!
//! - [`LocalRepository`] - a directory tree on disk
//! - [`MemoryRepository`] - in-memory files for tests and embedding

mod local;
mod memory;

pub use local::LocalRepository;
pub use memory::MemoryRepository;

use crate::error::Result;
use crate::location::RepoLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// File or directory name, no path
    pub name: String,
    pub kind: EntryKind,
    /// Path from the repository root
    pub path: String,
}

impl RepoEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
        }
    }

    /// Text after the last `.` of the name, if the name has a dot
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// Source of workflow files
pub trait Repository {
    /// Entries directly inside `location` (one level, not recursive)
    fn list_directory(&self, location: &RepoLocation) -> Result<Vec<RepoEntry>>;

    /// Content of the file at `location` as of `revision`
    fn read_file(&self, location: &RepoLocation, revision: &str) -> Result<String>;
}

/// Join a directory path and an entry name with `/`
pub(crate) fn child_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_text_after_last_dot() {
        let entry = RepoEntry::new("main.workflow.cwl", EntryKind::File, "main.workflow.cwl");
        assert_eq!(entry.extension(), Some("cwl"));
        assert_eq!(RepoEntry::new("Makefile", EntryKind::File, "Makefile").extension(), None);
        assert_eq!(RepoEntry::new(".cwl", EntryKind::File, ".cwl").extension(), Some("cwl"));
    }

    #[test]
    fn child_path_joins() {
        assert_eq!(child_path("", "a.cwl"), "a.cwl");
        assert_eq!(child_path("tools/", "a.cwl"), "tools/a.cwl");
        assert_eq!(child_path("tools", "a.cwl"), "tools/a.cwl");
    }
}
