//! Repository locations

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CwlError, Result};

/// `https://github.com/<owner>/<repo>/(tree|blob)/<branch>[/<path>]`
static GITHUB_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://github\.com/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/(?:tree|blob)/([^/]+)(?:/(.*?))?/?$")
        .expect("valid GitHub URL pattern")
});

/// A directory or file inside a repository at a branch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoLocation {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    /// Slash-separated path from the repository root; empty for the root
    pub path: String,
}

impl RepoLocation {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            path: path.into(),
        }
    }

    /// Location of a local checkout; owner, repo and branch are left empty
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Parse a GitHub tree or blob URL
    pub fn from_url(url: &str) -> Result<Self> {
        let caps = GITHUB_URL
            .captures(url.trim())
            .ok_or_else(|| CwlError::InvalidLocation {
                input: url.to_string(),
            })?;
        Ok(Self::new(
            &caps[1],
            &caps[2],
            &caps[3],
            caps.get(4).map_or("", |m| m.as_str()),
        ))
    }

    /// Same repository and branch, different path
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.owner.is_empty() {
            return write!(f, "{}", self.path);
        }
        write!(f, "{}/{}@{}:{}", self.owner, self.repo, self.branch, self.path)
    }
}
