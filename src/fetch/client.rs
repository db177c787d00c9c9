//! HTTP client wrapper for single-mirror retrieval.
//!
//! Only a `200 OK` response counts as a hit. The destination file is created
//! after the status is known, so a miss never touches the disk.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

use super::constants::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use super::error::FetchError;
use crate::user_agent;

/// HTTP client shared by every fetch in a run.
///
/// Create once and reuse to take advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client with the default timeouts (30s connect, 5min request).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the TLS backend or system
    /// configuration cannot be initialized.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS)
    }

    /// Creates a client with explicit connect and whole-request timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the client cannot be built.
    #[instrument(level = "debug")]
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(request_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Downloads `url` into `destination`, returning the bytes written.
    ///
    /// The file is created only once the server answered `200 OK`. If the
    /// body stream breaks, the partially written file is removed.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the request fails, the status is not `200`, or
    /// writing to disk fails.
    #[instrument(skip(self, destination), fields(url = %url))]
    pub async fn download_to(&self, url: &str, destination: &Path) -> Result<u64, FetchError> {
        let response = self.get(url).await?;

        let mut file = File::create(destination)
            .await
            .map_err(|e| FetchError::io(destination, e))?;

        let stream_result = stream_to_file(&mut file, response, url, destination).await;
        if stream_result.is_err() {
            drop(file);
            debug!(path = %destination.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(destination).await;
        }

        stream_result
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, e)
            }
        })?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::http_status(url, response.status().as_u16()));
        }

        Ok(response)
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, FetchError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url)
            } else {
                FetchError::network(url, e)
            }
        })?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| FetchError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| FetchError::io(file_path, e))?;

    Ok(bytes_written)
}
