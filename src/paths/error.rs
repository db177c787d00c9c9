//! Error types for reference resolution.

use thiserror::Error;

/// Failure of the legacy file index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The prefix query failed.
    #[error("legacy file index query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Errors that stop path resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No reference produced a path, so there is nothing to fetch.
    #[error("no files to download\n  Suggestion: Pass URLs, wildcard patterns or URL list files after the entry id")]
    NothingToRetrieve,

    /// A wildcard pattern was given but no legacy index is configured.
    #[error("cannot expand wildcard '{pattern}': no legacy file index configured")]
    NoLegacyIndex {
        /// The pattern that could not be expanded.
        pattern: String,
    },

    /// The legacy index failed while expanding a pattern.
    #[error(transparent)]
    Index(#[from] IndexError),
}
