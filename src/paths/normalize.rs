//! Literal reference normalization.

use tracing::{trace, warn};

use super::ResolvedPath;

/// The only scheme recognized and stripped; others are kept as part of the path.
pub const HTTP_SCHEME: &str = "http://";

/// File names tried, in order, for a directory-style reference.
pub const DIRECTORY_INDEX_FILES: [&str; 4] = ["index.html", "index.htm", "index.php", "index.phtml"];

/// Maps a URL or launch command to server-relative candidate paths.
///
/// 1. A leading `http://` is removed.
/// 2. Everything from the first `?` is dropped.
/// 3. A string without any `/` is a host reference and gets a trailing `/`.
/// 4. A string ending in `/` expands to one candidate per [`DIRECTORY_INDEX_FILES`] entry.
/// 5. Anything else is returned as a single path.
///
/// Malformed input is passed through; it fails later when fetched. An empty
/// reference yields no paths.
///
/// # Examples
///
/// ```
/// use gamezipper_core::paths::normalize;
///
/// let paths = normalize("http://example.org/file.swf?x=1");
/// assert_eq!(paths.len(), 1);
/// assert_eq!(paths[0].as_str(), "example.org/file.swf");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Vec<ResolvedPath> {
    if raw.is_empty() {
        return Vec::new();
    }

    let without_scheme = raw.strip_prefix(HTTP_SCHEME).unwrap_or(raw);
    let without_query = without_scheme
        .split_once('?')
        .map_or(without_scheme, |(path, _query)| path);

    let mut path = without_query.to_string();
    if !path.contains('/') {
        path.push('/');
    }

    let resolved: Vec<ResolvedPath> = if path.ends_with('/') {
        DIRECTORY_INDEX_FILES
            .iter()
            .filter_map(|index_file| ResolvedPath::new(format!("{path}{index_file}")))
            .collect()
    } else if let Some(resolved) = ResolvedPath::new(path) {
        vec![resolved]
    } else {
        warn!(raw, "Reference normalizes to an unusable path, dropping it");
        Vec::new()
    };

    trace!(raw, candidates = resolved.len(), "normalized reference");
    resolved
}
