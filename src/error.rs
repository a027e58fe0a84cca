//! Error types with fix suggestions
//!
//! Only ingestion can fail. Missing or oddly shaped fields inside a document
//! are never errors: extractors return `None` and normalization carries on.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CwlError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum CwlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to retrieve '{location}': {reason}")]
    Retrieval { location: String, reason: String },

    #[error("Failed to parse '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("'{location}' does not exist in the repository")]
    NotFound { location: String },

    #[error("Invalid repository location: {input}")]
    InvalidLocation { input: String },

    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl FixSuggestion for CwlError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            CwlError::Io(_) => Some("Check file path and permissions"),
            CwlError::Retrieval { .. } => Some("Check the repository is reachable and the revision exists"),
            CwlError::Parse { .. } => Some("Check YAML syntax: indentation and quoting"),
            CwlError::NotFound { .. } => Some("Check the directory path inside the repository"),
            CwlError::InvalidLocation { .. } => {
                Some("Use https://github.com/<owner>/<repo>/tree/<branch>/<path>")
            }
            CwlError::Config { .. } => Some("Check the config file (TOML) and CWLVIEW_* variables"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_the_file() {
        let source = serde_yaml::from_str::<serde_yaml::Value>("a: [b").unwrap_err();
        let err = CwlError::Parse {
            file: "broken.cwl".to_string(),
            source,
        };
        assert!(err.to_string().contains("broken.cwl"));
        assert!(err.fix_suggestion().unwrap().contains("YAML"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CwlError = io.into();
        assert!(matches!(err, CwlError::Io(_)));
        assert!(err.fix_suggestion().is_some());
    }
}
