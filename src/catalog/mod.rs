//! Read-only access to the content catalog.
//!
//! The catalog stores one `game` row per entry plus any number of
//! `additional_app` rows pointing back at it. This module exposes them through
//! the [`Catalog`] trait so the pipeline can run against a fake in tests.
//!
//! # Schema contracts
//!
//! Some application-path values carry meaning defined by the catalog, not by
//! this crate:
//! - [`ALREADY_PROCESSED_APPLICATION_PATH`] marks an entry that was converted before
//! - [`MESSAGE_APPLICATION_PATH`] and [`EXTRAS_APPLICATION_PATH`] mark
//!   sub-application rows that are metadata, not launchable content

mod error;
mod sqlite;

pub use error::CatalogError;
pub use sqlite::SqliteCatalog;

use async_trait::async_trait;
use sqlx::FromRow;
use tracing::{debug, instrument};

/// Application path of an entry whose content was already packaged.
pub const ALREADY_PROCESSED_APPLICATION_PATH: &str = "";

/// Application path of a sub-application row that carries a message.
pub const MESSAGE_APPLICATION_PATH: &str = ":message:";

/// Application path of a sub-application row that points at an extras folder.
pub const EXTRAS_APPLICATION_PATH: &str = ":extras:";

/// Primary catalog row for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct CatalogEntry {
    /// Unique entry id.
    pub id: String,
    pub title: String,
    pub library: String,
    pub play_mode: String,
    pub release_date: String,
    pub language: String,
    /// Tags joined with `"; "`.
    pub tags: String,
    pub source: String,
    pub platform_name: String,
    /// Platforms joined with `"; "`.
    pub platforms: String,
    pub status: String,
    pub application_path: String,
    pub launch_command: String,
}

impl CatalogEntry {
    /// Returns true if the entry was already converted by a previous run.
    #[must_use]
    pub fn is_already_processed(&self) -> bool {
        self.application_path == ALREADY_PROCESSED_APPLICATION_PATH
    }
}

/// What an additional application row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalAppKind {
    /// Message shown before launch; not content.
    Message,
    /// Pointer at an extras folder; not content.
    Extras,
    /// A launchable sub-application whose command references content.
    Launch,
}

/// Sub-application row belonging to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct AdditionalApp {
    pub name: String,
    pub application_path: String,
    pub launch_command: String,
}

impl AdditionalApp {
    /// Classifies the row by its application path sentinel.
    #[must_use]
    pub fn kind(&self) -> AdditionalAppKind {
        match self.application_path.as_str() {
            MESSAGE_APPLICATION_PATH => AdditionalAppKind::Message,
            EXTRAS_APPLICATION_PATH => AdditionalAppKind::Extras,
            _ => AdditionalAppKind::Launch,
        }
    }

    /// Rows with any empty field are ignored entirely.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.application_path.is_empty() && !self.launch_command.is_empty()
    }

    /// Returns the launch command if this row references content.
    #[must_use]
    pub fn content_reference(&self) -> Option<&str> {
        (self.is_complete() && self.kind() == AdditionalAppKind::Launch)
            .then_some(self.launch_command.as_str())
    }
}

/// An entry together with its sub-applications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryRecord {
    pub entry: CatalogEntry,
    pub additional_apps: Vec<AdditionalApp>,
}

impl EntryRecord {
    /// Every launch command that references content, primary first.
    #[must_use]
    pub fn content_references(&self) -> Vec<&str> {
        std::iter::once(self.entry.launch_command.as_str())
            .chain(
                self.additional_apps
                    .iter()
                    .filter_map(AdditionalApp::content_reference),
            )
            .collect()
    }
}

/// Read-only lookup contract for the content catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Returns the entry with the given id, if any.
    async fn entry(&self, id: &str) -> Result<Option<CatalogEntry>, CatalogError>;

    /// Returns all sub-application rows of the given entry.
    async fn additional_apps(&self, id: &str) -> Result<Vec<AdditionalApp>, CatalogError>;
}

/// Loads an entry and its sub-applications, rejecting unknown and
/// already-processed entries.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidEntryId`] when the id is unknown,
/// [`CatalogError::AlreadyProcessed`] when the entry was converted before, and
/// [`CatalogError::Query`] when the underlying store fails.
#[instrument(skip(catalog))]
pub async fn load_entry(catalog: &dyn Catalog, id: &str) -> Result<EntryRecord, CatalogError> {
    let entry = catalog
        .entry(id)
        .await?
        .ok_or_else(|| CatalogError::invalid_entry_id(id))?;

    if entry.is_already_processed() {
        return Err(CatalogError::already_processed(id));
    }

    let additional_apps = catalog.additional_apps(id).await?;
    debug!(
        title = %entry.title,
        additional_apps = additional_apps.len(),
        "loaded catalog entry"
    );

    Ok(EntryRecord {
        entry,
        additional_apps,
    })
}
