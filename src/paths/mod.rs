//! Turning raw references into the set of server-relative paths to retrieve.
//!
//! References come from catalog launch commands, CLI arguments and lines of
//! text files. Each one is either a literal (a URL or launch command) or a
//! trailing-wildcard pattern:
//!
//! - [`normalize`] maps a literal to one or more [`ResolvedPath`]s
//! - [`expand`] resolves a wildcard pattern against a [`LegacyIndex`]
//! - [`PathSet`] collects everything and freezes it into a sorted, deduplicated list
//!
//! # Example
//!
//! ```
//! use gamezipper_core::paths::{PathSet, RawReference};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut set = PathSet::new();
//! set.add_reference(&RawReference::classify("http://example.org/file.swf?x=1"), None)
//!     .await?;
//! let paths = set.finalize()?;
//! assert_eq!(paths[0].as_str(), "example.org/file.swf");
//! # Ok(())
//! # }
//! ```

mod error;
mod normalize;
mod path_set;
mod wildcard;

pub use error::{IndexError, ResolveError};
pub use normalize::{DIRECTORY_INDEX_FILES, HTTP_SCHEME, normalize};
pub use path_set::{PathSet, finalize};
pub use wildcard::{LEGACY_ROOT, LegacyIndex, SqliteLegacyIndex, expand};

use std::fmt;

/// Marker that turns a reference into a wildcard pattern when it ends with it.
pub const WILDCARD_MARKER: char = '*';

/// A reference as read from the catalog, the command line or a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawReference {
    /// A URL or launch command naming a file or a directory.
    Literal(String),
    /// A pattern ending in [`WILDCARD_MARKER`], expanded through the legacy index.
    Wildcard(String),
}

impl RawReference {
    /// Classifies a raw string by its trailing wildcard marker.
    #[must_use]
    pub fn classify(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.ends_with(WILDCARD_MARKER) {
            Self::Wildcard(raw)
        } else {
            Self::Literal(raw)
        }
    }

    /// Returns the reference text as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(raw) | Self::Wildcard(raw) => raw,
        }
    }

    /// Returns true for wildcard patterns.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }
}

/// A normalized, server-relative path such as `example.org/data/a.txt`.
///
/// Never empty and never ends in the wildcard marker. Ordering is ordinal
/// (byte-wise) string comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    /// Wraps a path, returning `None` for empty strings and unexpanded wildcards.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Option<Self> {
        let path = path.into();
        if path.is_empty() || path.ends_with(WILDCARD_MARKER) {
            None
        } else {
            Some(Self(path))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_trailing_star_is_wildcard() {
        assert!(RawReference::classify("http://example.org/data/*").is_wildcard());
        assert!(!RawReference::classify("http://example.org/a*b.swf").is_wildcard());
        assert_eq!(
            RawReference::classify("http://example.org/").as_str(),
            "http://example.org/"
        );
    }

    #[test]
    fn test_resolved_path_rejects_empty_and_wildcards() {
        assert!(ResolvedPath::new("").is_none());
        assert!(ResolvedPath::new("example.org/*").is_none());
        assert_eq!(
            ResolvedPath::new("example.org/a.swf").map(ResolvedPath::into_string),
            Some("example.org/a.swf".to_string())
        );
    }

    #[test]
    fn test_resolved_path_orders_ordinally() {
        let upper = ResolvedPath::new("B").unwrap();
        let lower = ResolvedPath::new("a").unwrap();
        assert!(upper < lower, "ordinal order puts uppercase first");
    }
}
