//! Retrieval of resolved paths from prioritized mirror servers.
//!
//! # Features
//!
//! - Ordered per-path fallback across mirror servers
//! - Skip-if-present, so an interrupted run can simply be repeated
//! - Streaming writes; nothing is written for a server that misses
//! - Explicit connect and request timeouts (30s / 5min by default)
//! - One outcome per path; a failed path never aborts the batch
//!
//! # Example
//!
//! ```no_run
//! use gamezipper_core::fetch::{HttpClient, MirrorFetcher, MirrorList};
//! use gamezipper_core::paths::normalize;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = MirrorFetcher::new(HttpClient::new()?);
//! let servers = MirrorList::new(["http://primary.example", "http://backup.example"])?;
//! let paths = normalize("http://example.org/game.swf");
//! let report = fetcher.fetch(&paths, &servers, Path::new("./content")).await;
//! println!("fetched {}, failed {}", report.fetched(), report.failed());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod destination;
mod error;
mod fetcher;
mod mirror;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
pub use destination::destination_for;
pub use error::FetchError;
pub use fetcher::{FetchFailure, FetchOutcome, FetchReport, MirrorFetcher};
pub use mirror::MirrorList;
