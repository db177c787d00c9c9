//! Read-only SQLite connectivity for the catalog and the legacy file index.
//!
//! Both stores are owned by other systems, so this module never writes to
//! them and never runs migrations. Connections are opened with `mode=ro`.
//!
//! # Example
//!
//! ```no_run
//! use gamezipper_core::Database;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::open_read_only(Path::new("flashpoint.sqlite")).await?;
//! // Hand db to SqliteCatalog or SqliteLegacyIndex...
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::instrument;

/// Maximum number of pooled connections.
/// Queries run strictly one after another, so a tiny pool is enough.
const DEFAULT_MAX_CONNECTIONS: u32 = 2;

/// Database-related errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// The database file does not exist.
    #[error("database file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Failed to connect to the database.
    #[error("failed to connect to database: {0}")]
    Connection(#[from] sqlx::Error),
}

/// Database connection wrapper with a read-only connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens an existing SQLite file in read-only mode.
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the file is missing (SQLite would
    /// otherwise report an opaque "unable to open" error), or
    /// `DbError::Connection` if the connection fails.
    #[instrument(skip(db_path), fields(path = %db_path.display()))]
    pub async fn open_read_only(db_path: &Path) -> Result<Self, DbError> {
        if !db_path.is_file() {
            return Err(DbError::NotFound {
                path: db_path.to_path_buf(),
            });
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Creates an empty in-memory database.
    ///
    /// The pool is pinned to a single connection so every query sees the same
    /// in-memory store. Used by tests to seed catalog and index fixtures.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the connection fails.
    #[instrument]
    pub async fn new_in_memory() -> Result<Self, DbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Gracefully closes all connections in the pool.
    #[instrument(skip(self))]
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_new_in_memory_succeeds() {
        let db = Database::new_in_memory().await;
        assert!(db.is_ok(), "Failed to create in-memory database");
    }

    #[tokio::test]
    async fn test_open_read_only_missing_file_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing.sqlite");

        let result = Database::open_read_only(&missing).await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_open_read_only_rejects_writes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("catalog.sqlite");

        let seed_options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Delete);
        let seed = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(seed_options)
            .await
            .unwrap();
        sqlx::query("CREATE TABLE files (path TEXT)")
            .execute(&seed)
            .await
            .unwrap();
        seed.close().await;

        let db = Database::open_read_only(&db_path).await.unwrap();
        let write = sqlx::query("INSERT INTO files (path) VALUES ('x')")
            .execute(db.pool())
            .await;
        assert!(write.is_err(), "read-only database accepted a write");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM files")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 0);
        db.close().await;
    }
}
