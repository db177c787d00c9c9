//! Collecting resolved paths into one deterministic fetch list.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use super::error::ResolveError;
use super::normalize::normalize;
use super::wildcard::{LegacyIndex, expand};
use super::{RawReference, ResolvedPath};

/// Deduplicating accumulator for resolved paths.
///
/// Built incrementally while references are resolved, then frozen exactly once
/// with [`PathSet::finalize`]. The result depends only on the multiset of
/// inserted paths, never on insertion order.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    paths: BTreeSet<ResolvedPath>,
}

impl PathSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a path, returning false if it was already present.
    pub fn insert(&mut self, path: ResolvedPath) -> bool {
        self.paths.insert(path)
    }

    /// Inserts a raw path string; empty strings are ignored.
    pub fn insert_str(&mut self, path: &str) -> bool {
        ResolvedPath::new(path).is_some_and(|path| self.insert(path))
    }

    /// Number of distinct paths collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Resolves one reference and adds its paths.
    ///
    /// Literals go through [`normalize`]; wildcard patterns are expanded
    /// through `index`. Returns how many previously unseen paths were added.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoLegacyIndex`] for a wildcard when `index` is
    /// `None`, and [`ResolveError::Index`] when the index query fails.
    #[instrument(skip(self, reference, index), fields(reference = %reference.as_str()))]
    pub async fn add_reference(
        &mut self,
        reference: &RawReference,
        index: Option<&dyn LegacyIndex>,
    ) -> Result<usize, ResolveError> {
        let resolved = match reference {
            RawReference::Literal(raw) => normalize(raw),
            RawReference::Wildcard(pattern) => {
                let index = index.ok_or_else(|| ResolveError::NoLegacyIndex {
                    pattern: pattern.clone(),
                })?;
                expand(pattern, index).await?
            }
        };

        let added = resolved
            .into_iter()
            .filter_map(|path| self.insert(path).then_some(()))
            .count();
        debug!(added, total = self.len(), "resolved reference");
        Ok(added)
    }

    /// Freezes the set into an ordinally sorted sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NothingToRetrieve`] if no path was collected.
    pub fn finalize(self) -> Result<Vec<ResolvedPath>, ResolveError> {
        if self.paths.is_empty() {
            return Err(ResolveError::NothingToRetrieve);
        }
        Ok(self.paths.into_iter().collect())
    }
}

impl Extend<ResolvedPath> for PathSet {
    fn extend<I: IntoIterator<Item = ResolvedPath>>(&mut self, iter: I) {
        self.paths.extend(iter);
    }
}

impl FromIterator<ResolvedPath> for PathSet {
    fn from_iter<I: IntoIterator<Item = ResolvedPath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

/// Concatenates path sources, deduplicates and sorts them.
///
/// # Errors
///
/// Returns [`ResolveError::NothingToRetrieve`] if every source was empty.
pub fn finalize<I, S>(sources: I) -> Result<Vec<ResolvedPath>, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = ResolvedPath>,
{
    sources.into_iter().flatten().collect::<PathSet>().finalize()
}
