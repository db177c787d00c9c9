//! Gamezipper Core Library
//!
//! This library packages one catalog entry into an offline, self-contained
//! curation: it resolves every file the entry references, retrieves each one
//! from a prioritized list of mirror servers, writes the entry metadata and
//! images alongside, and hands the directory to an external archiver.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`db`] - Read-only SQLite connections
//! - [`catalog`] - Entry and sub-application lookup
//! - [`paths`] - URL normalization, wildcard expansion and path-set assembly
//! - [`fetch`] - Mirror-fallback HTTP retrieval
//! - [`curation`] - Curation directory layout, `meta.yaml` and images
//! - [`archive`] - External archiver invocation

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod catalog;
pub mod curation;
pub mod db;
pub mod fetch;
pub mod paths;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use archive::{ArchiveError, Archiver};
pub use catalog::{Catalog, CatalogError, EntryRecord, SqliteCatalog, load_entry};
pub use curation::{CurationError, CurationLayout, fetch_images};
pub use db::{Database, DbError};
pub use fetch::{FetchOutcome, FetchReport, HttpClient, MirrorFetcher, MirrorList};
pub use paths::{
    LegacyIndex, PathSet, RawReference, ResolveError, ResolvedPath, SqliteLegacyIndex, normalize,
};
