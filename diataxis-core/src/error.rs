use std::path::PathBuf;

use crate::types::Category;

/// Failures outside the analysis itself: loading configuration, compiling
/// rule patterns, reading paths, and serializing reports. Analysis of a
/// document's text never produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid pattern for {category} `{pattern}`: {source}")]
    InvalidPattern {
        category: Category,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown diataxis category: {0}")]
    UnknownCategory(String),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LintError>;
