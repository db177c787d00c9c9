//! Error types for catalog lookups.

use thiserror::Error;

/// Errors that can occur while reading an entry from the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No entry exists with the requested id.
    #[error("invalid entry id: {id}\n  Suggestion: Check the id against the catalog")]
    InvalidEntryId {
        /// The id that was looked up.
        id: String,
    },

    /// The entry has already been converted (its application path was cleared).
    #[error("entry {id} appears to have been zipped already")]
    AlreadyProcessed {
        /// The id of the processed entry.
        id: String,
    },

    /// The catalog query itself failed.
    #[error("catalog query failed: {0}")]
    Query(#[from] sqlx::Error),
}

impl CatalogError {
    /// Creates an invalid entry id error.
    pub fn invalid_entry_id(id: impl Into<String>) -> Self {
        Self::InvalidEntryId { id: id.into() }
    }

    /// Creates an already-processed error.
    pub fn already_processed(id: impl Into<String>) -> Self {
        Self::AlreadyProcessed { id: id.into() }
    }
}
