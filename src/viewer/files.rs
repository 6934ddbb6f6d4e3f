//! Daily log file enumeration and reading
//!
//! Operates on the same directory the facility appends into, without taking
//! its write lock: a file being read may gain a partial trailing line while
//! the response is built, which viewers treat as acceptable imprecision.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Extension of the daily log files
pub const LOG_EXTENSION: &str = ".log";

/// Failures while listing or reading log files, surfaced to the HTTP caller
#[derive(Debug, Error)]
pub enum FileAccessError {
    #[error("invalid log file name")]
    InvalidName,
    #[error("log file not found")]
    NotFound,
    #[error("failed to read log directory: {0}")]
    ListDir(#[source] std::io::Error),
    #[error("failed to read log file: {0}")]
    ReadFile(#[source] std::io::Error),
}

/// List the daily log file names in the directory, newest first
///
/// Only files ending in `.log` are included; date-named files sort
/// lexicographically, so a reverse sort puts the latest day on top.
pub fn list_log_files(log_dir: &Path) -> Result<Vec<String>, FileAccessError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(log_dir).map_err(FileAccessError::ListDir)? {
        let entry = entry.map_err(FileAccessError::ListDir)?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(LOG_EXTENSION) {
                names.push(name.to_string());
            }
        }
    }
    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names)
}

/// Check that a caller-supplied name is a plain log file name
///
/// Rejects path separators and parent references so a query parameter can
/// never escape the log directory.
pub fn is_valid_file_name(name: &str) -> bool {
    name.ends_with(LOG_EXTENSION)
        && name.len() > LOG_EXTENSION.len()
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}

/// Read the contents of one daily log file by name
pub fn read_log_file(log_dir: &Path, name: &str) -> Result<String, FileAccessError> {
    if !is_valid_file_name(name) {
        return Err(FileAccessError::InvalidName);
    }
    match fs::read_to_string(log_dir.join(name)) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FileAccessError::NotFound),
        Err(e) => Err(FileAccessError::ReadFile(e)),
    }
}
