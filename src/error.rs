//! Error types for the triage pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Triage pipeline errors
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("input artifact not found: {0}")]
    MissingInput(PathBuf),

    #[error("failed to parse line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl TriageError {
    /// Process exit code for this error. A missing input artifact gets its
    /// own code so callers can tell "nothing to triage yet" apart from a
    /// broken run.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput(_) => 2,
            _ => 1,
        }
    }
}
