//! Error types for curation directory assembly.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while laying out the curation directory.
#[derive(Debug, Error)]
pub enum CurationError {
    /// Creating a directory or writing a file failed.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl CurationError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
