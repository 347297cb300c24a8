//! Error types for schema analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while parsing a schema `id` URI.
#[derive(Debug, Error)]
pub enum UriError {
    #[error("invalid URI \"{uri}\": missing scheme")]
    MissingScheme { uri: String },

    #[error("invalid URI \"{uri}\": missing authority")]
    MissingAuthority { uri: String },
}

/// Errors during schema analysis.
///
/// Every variant is fatal to the run; unsupported but syntactically valid
/// schema constructs are skipped, never reported here. Unresolved references
/// are not errors either, they degrade to the `Unknown` placeholder concept.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    // IO errors (exit code 3)
    #[error("invalid input: {path} is neither a file nor a directory")]
    InvalidInput { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Schema errors (exit code 2)
    #[error("schema root must carry a string \"id\" field")]
    MissingId,

    #[error(transparent)]
    InvalidUri(#[from] UriError),
}

impl AnalyzeError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzeError::InvalidInput { .. } | AnalyzeError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}
