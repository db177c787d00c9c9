//! Mirror-fallback retrieval of a resolved path list.
//!
//! # Per-path algorithm
//!
//! 1. Map the path under the destination root; an unrepresentable path fails.
//! 2. An existing file is skipped, which makes re-runs resumable.
//! 3. The parent directory is created.
//! 4. Servers are tried in priority order until one answers `200 OK`.
//! 5. If none does, the path fails.
//!
//! A failing path never stops the batch: every input path gets exactly one
//! [`FetchOutcome`], in input order.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use super::client::HttpClient;
use super::destination::destination_for;
use super::mirror::MirrorList;
use crate::paths::ResolvedPath;

/// Why a path could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The path cannot be mapped to a local file, or its directory cannot be created.
    MalformedDestination { reason: String },
    /// Writing the destination failed after a mirror answered.
    LocalWrite { reason: String },
    /// Every server was tried without success.
    ServersExhausted {
        attempts: usize,
        last_error: Option<String>,
    },
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDestination { reason } => write!(f, "malformed path: {reason}"),
            Self::LocalWrite { reason } => write!(f, "write failed: {reason}"),
            Self::ServersExhausted {
                attempts,
                last_error: Some(last_error),
            } => write!(f, "not found on {attempts} server(s); last error: {last_error}"),
            Self::ServersExhausted {
                attempts,
                last_error: None,
            } => write!(f, "not found on {attempts} server(s)"),
        }
    }
}

/// Result of retrieving one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The destination already existed; nothing was requested.
    Skipped,
    /// Retrieved from the server at `server` (index into the mirror list).
    Fetched { server: usize, bytes: u64 },
    Failed(FetchFailure),
}

impl FetchOutcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Outcomes of a batch, in the order the paths were given.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    outcomes: Vec<(ResolvedPath, FetchOutcome)>,
}

impl FetchReport {
    #[must_use]
    pub fn outcomes(&self) -> &[(ResolvedPath, FetchOutcome)] {
        &self.outcomes
    }

    #[must_use]
    pub fn fetched(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Fetched { .. }))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Skipped))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(FetchOutcome::is_failed)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Paths that could not be retrieved.
    pub fn failed_paths(&self) -> impl Iterator<Item = &ResolvedPath> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_failed())
            .map(|(path, _)| path)
    }

    fn count(&self, predicate: impl Fn(&FetchOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| predicate(o)).count()
    }

    fn push(&mut self, path: ResolvedPath, outcome: FetchOutcome) {
        self.outcomes.push((path, outcome));
    }
}

/// Sequential mirror-fallback fetcher.
#[derive(Debug, Clone)]
pub struct MirrorFetcher {
    client: HttpClient,
}

impl MirrorFetcher {
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetches every path under `dest_root`, one at a time, in the given order.
    #[instrument(skip(self, paths, servers, dest_root), fields(paths = paths.len(), dest_root = %dest_root.display()))]
    pub async fn fetch(
        &self,
        paths: &[ResolvedPath],
        servers: &MirrorList,
        dest_root: &Path,
    ) -> FetchReport {
        self.fetch_with_progress(paths, servers, dest_root, |_, _| {})
            .await
    }

    /// Like [`fetch`](Self::fetch), calling `on_outcome` after each path.
    pub async fn fetch_with_progress<F>(
        &self,
        paths: &[ResolvedPath],
        servers: &MirrorList,
        dest_root: &Path,
        mut on_outcome: F,
    ) -> FetchReport
    where
        F: FnMut(&ResolvedPath, &FetchOutcome),
    {
        let mut report = FetchReport::default();

        for path in paths {
            let outcome = self.fetch_path(path, servers, dest_root).await;
            on_outcome(path, &outcome);
            report.push(path.clone(), outcome);
        }

        info!(
            fetched = report.fetched(),
            skipped = report.skipped(),
            failed = report.failed(),
            total = report.total(),
            "fetch batch complete"
        );
        report
    }

    /// Fetches one resolved path to its mapped location under `dest_root`.
    pub async fn fetch_path(
        &self,
        path: &ResolvedPath,
        servers: &MirrorList,
        dest_root: &Path,
    ) -> FetchOutcome {
        match destination_for(dest_root, path.as_str()) {
            Ok(destination) => self.fetch_to(path.as_str(), servers, &destination).await,
            Err(e) => {
                warn!(path = %path, error = %e, "file has malformed path and will be skipped");
                FetchOutcome::Failed(FetchFailure::MalformedDestination {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Fetches `relative` from the first server that has it into `destination`.
    ///
    /// Used directly for assets whose local name differs from the server path.
    #[instrument(skip(self, servers, destination), fields(destination = %destination.display()))]
    pub async fn fetch_to(
        &self,
        relative: &str,
        servers: &MirrorList,
        destination: &Path,
    ) -> FetchOutcome {
        if is_existing_file(destination).await {
            info!(path = relative, "file already exists and will be skipped");
            return FetchOutcome::Skipped;
        }

        if let Some(parent) = destination.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            warn!(path = relative, error = %e, "file has malformed path and will be skipped");
            return FetchOutcome::Failed(FetchFailure::MalformedDestination {
                reason: e.to_string(),
            });
        }

        let mut last_error = None;
        for index in 0..servers.len() {
            let Some(url) = servers.url_for(index, relative) else {
                break;
            };

            match self.client.download_to(&url, destination).await {
                Ok(bytes) => {
                    info!(path = relative, server = index, bytes, "fetched");
                    return FetchOutcome::Fetched {
                        server: index,
                        bytes,
                    };
                }
                Err(e) if e.is_local() => {
                    warn!(path = relative, error = %e, "failed to write file");
                    return FetchOutcome::Failed(FetchFailure::LocalWrite {
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    debug!(path = relative, server = index, error = %e, "mirror miss");
                    last_error = Some(e.to_string());
                }
            }
        }

        warn!(path = relative, servers = servers.len(), "failed to download file");
        FetchOutcome::Failed(FetchFailure::ServersExhausted {
            attempts: servers.len(),
            last_error,
        })
    }
}

async fn is_existing_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_file())
}
