use std::io;
use thiserror::Error;

/// Error type for rbpfinder-io operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The table could not be rendered as JSON.
    #[error("Failed to serialize table as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown table output format.
    #[error("Unknown table format: {0}. Valid options are 'tsv' or 'json'")]
    UnknownFormat(String),
}

/// Result type alias for rbpfinder-io operations.
pub type Result<T> = std::result::Result<T, WriteError>;
