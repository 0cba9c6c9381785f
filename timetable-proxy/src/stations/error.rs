//! Station table error types.

use std::path::PathBuf;

/// Errors that can occur when loading a station table.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Table file could not be read
    #[error("failed to read station table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table file was not a JSON object of name → ID strings
    #[error("failed to parse station table {path}: {message}")]
    Json { path: PathBuf, message: String },
}
