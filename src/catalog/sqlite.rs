//! SQLite-backed catalog.

use async_trait::async_trait;
use tracing::instrument;

use super::{AdditionalApp, Catalog, CatalogEntry, CatalogError};
use crate::Database;

/// Catalog reader over the `game` and `additional_app` tables.
///
/// Nullable text columns are read as empty strings.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    db: Database,
}

impl SqliteCatalog {
    /// Wraps an open (typically read-only) catalog database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns the underlying database handle.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl Catalog for SqliteCatalog {
    #[instrument(skip(self))]
    async fn entry(&self, id: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let entry = sqlx::query_as::<_, CatalogEntry>(
            r"SELECT id,
                     COALESCE(title, '') AS title,
                     COALESCE(library, '') AS library,
                     COALESCE(playMode, '') AS play_mode,
                     COALESCE(releaseDate, '') AS release_date,
                     COALESCE(language, '') AS language,
                     COALESCE(tagsStr, '') AS tags,
                     COALESCE(source, '') AS source,
                     COALESCE(platformName, '') AS platform_name,
                     COALESCE(platformsStr, '') AS platforms,
                     COALESCE(status, '') AS status,
                     COALESCE(applicationPath, '') AS application_path,
                     COALESCE(launchCommand, '') AS launch_command
              FROM game
              WHERE id = ?
              LIMIT 1",
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn additional_apps(&self, id: &str) -> Result<Vec<AdditionalApp>, CatalogError> {
        let apps = sqlx::query_as::<_, AdditionalApp>(
            r"SELECT COALESCE(name, '') AS name,
                     COALESCE(applicationPath, '') AS application_path,
                     COALESCE(launchCommand, '') AS launch_command
              FROM additional_app
              WHERE parentGameId = ?
              ORDER BY rowid",
        )
        .bind(id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(apps)
    }
}
