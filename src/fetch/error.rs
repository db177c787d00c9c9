//! Error types for the fetch module.
//!
//! Every variant carries the URL or path it concerns so a per-path log line
//! is self-explanatory.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while retrieving a file from one mirror.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, reset, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The mirror answered with anything other than `200 OK`.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while writing the destination.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The relative path cannot be represented under the destination root.
    #[error("malformed path '{path}': {reason}")]
    MalformedPath {
        /// The relative path as resolved.
        path: String,
        /// Why it cannot be mapped.
        reason: &'static str,
    },

    /// A configured mirror base URL is not a usable HTTP URL.
    #[error("invalid mirror server '{url}': {reason}")]
    InvalidServer {
        /// The configured base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed path error.
    pub fn malformed_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedPath {
            path: path.into(),
            reason,
        }
    }

    /// Creates an invalid server error.
    pub fn invalid_server(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidServer {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the failure is on the local side, so trying another
    /// mirror cannot help.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::MalformedPath { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_http_status_display() {
        let error = FetchError::http_status("http://mirror.test/a.swf", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(msg.contains("http://mirror.test/a.swf"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_fetch_error_timeout_display() {
        let msg = FetchError::timeout("http://mirror.test/a.swf").to_string();
        assert!(msg.starts_with("timeout"), "got: {msg}");
    }

    #[test]
    fn test_fetch_error_locality() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(FetchError::io("/tmp/x", io_error).is_local());
        assert!(FetchError::malformed_path("../x", "escapes destination").is_local());
        assert!(!FetchError::http_status("http://m/x", 500).is_local());
        assert!(!FetchError::timeout("http://m/x").is_local());
    }

    #[test]
    fn test_fetch_error_malformed_path_display() {
        let msg = FetchError::malformed_path("a/../../b", "escapes destination").to_string();
        assert!(msg.contains("a/../../b"), "got: {msg}");
        assert!(msg.contains("escapes destination"), "got: {msg}");
    }
}
