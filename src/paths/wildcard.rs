//! Wildcard expansion against the legacy file index.
//!
//! The legacy index is a table of historical file paths, all stored under a
//! fixed root segment. It is supplementary data: a pattern that matches
//! nothing is a normal outcome, not an error.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::error::IndexError;
use super::normalize::HTTP_SCHEME;
use super::{ResolvedPath, WILDCARD_MARKER};
use crate::Database;

/// Root segment every stored legacy path starts with.
pub const LEGACY_ROOT: &str = "Legacy/htdocs/";

/// Escape character used in the `LIKE` prefix query.
const LIKE_ESCAPE: char = '\\';

/// Read-only prefix lookup over stored legacy paths.
#[async_trait]
pub trait LegacyIndex: Send + Sync {
    /// Root segment stored paths start with.
    fn root(&self) -> &str {
        LEGACY_ROOT
    }

    /// Returns every stored path starting with `prefix` (root included).
    async fn paths_with_prefix(&self, prefix: &str) -> Result<Vec<String>, IndexError>;
}

/// Expands a trailing-wildcard pattern into concrete server-relative paths.
///
/// The trailing `*` and a leading `http://` are removed, the index root is
/// prepended, and every stored path matching that prefix is returned with the
/// root stripped again.
///
/// # Errors
///
/// Returns [`IndexError`] only when the index itself fails.
#[instrument(skip(index))]
pub async fn expand(
    pattern: &str,
    index: &dyn LegacyIndex,
) -> Result<Vec<ResolvedPath>, IndexError> {
    let prefix = pattern.strip_suffix(WILDCARD_MARKER).unwrap_or(pattern);
    let prefix = prefix.strip_prefix(HTTP_SCHEME).unwrap_or(prefix);
    let root = index.root();

    let stored = index.paths_with_prefix(&format!("{root}{prefix}")).await?;
    let matched = stored.len();

    let expanded: Vec<ResolvedPath> = stored
        .into_iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(root).map(str::to_string);
            if relative.is_none() {
                debug!(path = %path, "stored path outside legacy root; ignoring");
            }
            relative.and_then(ResolvedPath::new)
        })
        .collect();

    debug!(matched, expanded = expanded.len(), "expanded wildcard");
    Ok(expanded)
}

/// Legacy index backed by the `files(path)` table of a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteLegacyIndex {
    db: Database,
}

impl SqliteLegacyIndex {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LegacyIndex for SqliteLegacyIndex {
    #[instrument(skip(self))]
    async fn paths_with_prefix(&self, prefix: &str) -> Result<Vec<String>, IndexError> {
        let pattern = format!("{}%", escape_like(prefix));
        let rows: Vec<(String,)> =
            sqlx::query_as(r"SELECT path FROM files WHERE path LIKE ? ESCAPE '\' ORDER BY path")
                .bind(pattern)
                .fetch_all(self.db.pool())
                .await?;

        Ok(rows.into_iter().map(|(path,)| path).collect())
    }
}

/// Escapes `LIKE` metacharacters so the prefix matches literally.
fn escape_like(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct VecIndex(Vec<&'static str>);

    #[async_trait]
    impl LegacyIndex for VecIndex {
        async fn paths_with_prefix(&self, prefix: &str) -> Result<Vec<String>, IndexError> {
            Ok(self
                .0
                .iter()
                .filter(|path| path.starts_with(prefix))
                .map(|path| (*path).to_string())
                .collect())
        }
    }

    fn strings(paths: Vec<ResolvedPath>) -> Vec<String> {
        paths.into_iter().map(ResolvedPath::into_string).collect()
    }

    #[tokio::test]
    async fn test_expand_strips_scheme_and_root() {
        let index = VecIndex(vec![
            "Legacy/htdocs/example.org/data/a.txt",
            "Legacy/htdocs/example.org/data/b.txt",
            "Legacy/htdocs/example.org/other/c.txt",
        ]);

        let expanded = expand("http://example.org/data/*", &index).await.unwrap();
        assert_eq!(
            strings(expanded),
            vec!["example.org/data/a.txt", "example.org/data/b.txt"]
        );
    }

    #[tokio::test]
    async fn test_expand_without_scheme() {
        let index = VecIndex(vec!["Legacy/htdocs/example.org/game.swf"]);
        let expanded = expand("example.org/ga*", &index).await.unwrap();
        assert_eq!(strings(expanded), vec!["example.org/game.swf"]);
    }

    #[tokio::test]
    async fn test_expand_no_matches_is_empty_not_error() {
        let index = VecIndex(vec!["Legacy/htdocs/example.org/a.txt"]);
        let expanded = expand("http://nowhere.test/*", &index).await.unwrap();
        assert!(expanded.is_empty());
    }

    #[tokio::test]
    async fn test_expand_drops_root_only_rows() {
        let index = VecIndex(vec!["Legacy/htdocs/"]);
        let expanded = expand("*", &index).await.unwrap();
        assert!(expanded.is_empty());
    }

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("a_b%c\\d"), "a\\_b\\%c\\\\d");
        assert_eq!(escape_like("example.org/x"), "example.org/x");
    }

    async fn seeded_index(paths: &[&str]) -> SqliteLegacyIndex {
        let db = Database::new_in_memory().await.unwrap();
        sqlx::query("CREATE TABLE files (path TEXT)")
            .execute(db.pool())
            .await
            .unwrap();
        for path in paths {
            sqlx::query("INSERT INTO files (path) VALUES (?)")
                .bind(*path)
                .execute(db.pool())
                .await
                .unwrap();
        }
        SqliteLegacyIndex::new(db)
    }

    #[tokio::test]
    async fn test_sqlite_index_prefix_query() {
        let index = seeded_index(&[
            "Legacy/htdocs/example.org/data/b.txt",
            "Legacy/htdocs/example.org/data/a.txt",
            "Legacy/htdocs/example.org/database.txt",
        ])
        .await;

        let expanded = expand("http://example.org/data/*", &index).await.unwrap();
        assert_eq!(
            strings(expanded),
            vec!["example.org/data/a.txt", "example.org/data/b.txt"]
        );
    }

    #[tokio::test]
    async fn test_sqlite_index_underscore_is_literal() {
        let index = seeded_index(&[
            "Legacy/htdocs/example.org/my_game/a.swf",
            "Legacy/htdocs/example.org/myXgame/b.swf",
        ])
        .await;

        let expanded = expand("http://example.org/my_game/*", &index).await.unwrap();
        assert_eq!(strings(expanded), vec!["example.org/my_game/a.swf"]);
    }
}
