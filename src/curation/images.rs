//! Logo and screenshot retrieval.
//!
//! Image servers shard by the first four characters of the entry id:
//! `Logos/0a/1b/0a1b2c3d-....png`.

use tracing::{info, warn};

use super::CurationLayout;
use crate::fetch::{FetchOutcome, MirrorFetcher, MirrorList};

/// An image stored alongside the curation metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAsset {
    Logo,
    Screenshot,
}

impl ImageAsset {
    /// Every asset, in retrieval order.
    pub const ALL: [ImageAsset; 2] = [ImageAsset::Logo, ImageAsset::Screenshot];

    /// Top-level folder on the image servers.
    #[must_use]
    pub fn server_folder(self) -> &'static str {
        match self {
            Self::Logo => "Logos",
            Self::Screenshot => "Screenshots",
        }
    }

    /// File name inside the curation directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Logo => "logo.png",
            Self::Screenshot => "ss.png",
        }
    }

    /// Server-relative path for `entry_id`, or `None` if the id is too short to shard.
    #[must_use]
    pub fn server_path(self, entry_id: &str) -> Option<String> {
        let first = entry_id.get(0..2)?;
        let second = entry_id.get(2..4)?;
        Some(format!(
            "{}/{first}/{second}/{entry_id}.png",
            self.server_folder()
        ))
    }
}

/// Retrieves every [`ImageAsset`] for the entry into the curation directory.
///
/// Failures are logged and returned alongside the asset; they never abort the run.
pub async fn fetch_images(
    fetcher: &MirrorFetcher,
    servers: &MirrorList,
    layout: &CurationLayout,
    entry_id: &str,
) -> Vec<(ImageAsset, FetchOutcome)> {
    if servers.is_empty() {
        warn!("no image servers configured, skipping logo and screenshot");
        return Vec::new();
    }

    let mut outcomes = Vec::with_capacity(ImageAsset::ALL.len());
    for asset in ImageAsset::ALL {
        let Some(server_path) = asset.server_path(entry_id) else {
            warn!(entry_id, "entry id too short to locate images, skipping");
            return outcomes;
        };

        let destination = layout.entry_dir().join(asset.file_name());
        let outcome = fetcher.fetch_to(&server_path, servers, &destination).await;
        if outcome.is_failed() {
            warn!(image = asset.file_name(), "image not retrieved");
        } else {
            info!(image = asset.file_name(), "image ready");
        }
        outcomes.push((asset, outcome));
    }
    outcomes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetch::HttpClient;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ID: &str = "0a1b2c3d-0000-4000-8000-000000000000";

    #[test]
    fn test_server_paths() {
        assert_eq!(
            ImageAsset::Logo.server_path(ID).unwrap(),
            format!("Logos/0a/1b/{ID}.png")
        );
        assert_eq!(
            ImageAsset::Screenshot.server_path(ID).unwrap(),
            format!("Screenshots/0a/1b/{ID}.png")
        );
    }

    #[test]
    fn test_short_id_has_no_server_path() {
        assert!(ImageAsset::Logo.server_path("abc").is_none());
        assert!(ImageAsset::Logo.server_path("").is_none());
    }

    #[tokio::test]
    async fn test_fetch_images_falls_back_between_servers() {
        let first = MockServer::start().await;
        let second = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/Logos/0a/1b/{ID}.png")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"logo".to_vec()))
            .mount(&first)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/Screenshots/0a/1b/{ID}.png")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"shot".to_vec()))
            .mount(&second)
            .await;

        let temp = TempDir::new().unwrap();
        let layout = CurationLayout::new(temp.path(), "Sample", ID);
        let servers = MirrorList::new([first.uri(), second.uri()]).unwrap();
        let fetcher = MirrorFetcher::new(HttpClient::new().unwrap());

        let outcomes = fetch_images(&fetcher, &servers, &layout, ID).await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|(_, outcome)| !outcome.is_failed()));
        assert_eq!(
            std::fs::read(layout.entry_dir().join("logo.png")).unwrap(),
            b"logo"
        );
        assert_eq!(
            std::fs::read(layout.entry_dir().join("ss.png")).unwrap(),
            b"shot"
        );
    }

    #[tokio::test]
    async fn test_fetch_images_without_servers() {
        let temp = TempDir::new().unwrap();
        let layout = CurationLayout::new(temp.path(), "Sample", ID);
        let servers = MirrorList::new(Vec::<String>::new()).unwrap();
        let fetcher = MirrorFetcher::new(HttpClient::new().unwrap());

        let outcomes = fetch_images(&fetcher, &servers, &layout, ID).await;
        assert!(outcomes.is_empty());
    }
}
