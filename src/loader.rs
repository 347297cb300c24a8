//! Document loading and input collection.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::AnalyzeError;

/// Load a JSON document from a file path.
///
/// # Errors
///
/// Returns `AnalyzeError::ReadError` if the file can't be read, or
/// `AnalyzeError::InvalidJson` if it isn't valid JSON.
pub fn load_document(path: &Path) -> Result<Value, AnalyzeError> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalyzeError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| AnalyzeError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Collect the input files of a directory batch.
///
/// Direct children only; subdirectories are not descended into. Files are
/// sorted by name so batch order is deterministic across platforms.
pub fn collect_input_files(dir: &Path) -> Result<Vec<PathBuf>, AnalyzeError> {
    let entries = std::fs::read_dir(dir).map_err(|source| AnalyzeError::ReadError {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AnalyzeError::ReadError {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
