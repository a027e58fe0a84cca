//! Viewer configuration
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. CLI flags (applied by the binary)
//! 2. Environment variables (`CWLVIEW_EXTENSION`, `CWLVIEW_ENTRY_STRATEGY`)
//! 3. Config file passed with `--config`
//! 4. Defaults

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entry::EntryStrategy;
use crate::error::{CwlError, Result};

pub const DEFAULT_EXTENSION: &str = "cwl";

const ENV_EXTENSION: &str = "CWLVIEW_EXTENSION";
const ENV_ENTRY_STRATEGY: &str = "CWLVIEW_ENTRY_STRATEGY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Extension (without the dot) of files to ingest
    pub extension: String,

    /// How to pick the entry workflow among several
    pub entry_strategy: EntryStrategy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            entry_strategy: EntryStrategy::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| CwlError::Config {
            reason: format!("Failed to parse config: {}", e),
        })?;
        config.validated()
    }

    /// Load from a TOML file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CwlError::Config {
            reason: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml(&content)
    }

    /// Override fields from `CWLVIEW_*` environment variables
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable lookup (empty values are ignored)
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(extension) = lookup(ENV_EXTENSION).filter(|v| !v.is_empty()) {
            self.extension = extension;
        }
        if let Some(strategy) = lookup(ENV_ENTRY_STRATEGY).filter(|v| !v.is_empty()) {
            self.entry_strategy = strategy.parse()?;
        }
        self.validated()
    }

    /// Replace the extension (a leading dot is accepted)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Result<Self> {
        self.extension = extension.into();
        self.validated()
    }

    /// Normalize `.cwl` to `cwl` and reject an empty extension
    fn validated(mut self) -> Result<Self> {
        self.extension = self.extension.trim().trim_start_matches('.').to_string();
        if self.extension.is_empty() {
            return Err(CwlError::Config {
                reason: "extension must not be empty".to_string(),
            });
        }
        Ok(self)
    }
}
