//! Configuration file loading and validation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use gamezipper_core::MirrorList;
use gamezipper_core::archive::DEFAULT_ARCHIVER;
use gamezipper_core::fetch::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use serde::Deserialize;

const DEFAULT_OUTPUT_DIRECTORY: &str = "out";

/// JSON-backed run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct FileConfig {
    /// Catalog database holding the `game` and `additional_app` tables.
    pub(crate) flashpoint_database: PathBuf,
    /// Legacy file index; only needed for wildcard patterns.
    #[serde(default)]
    pub(crate) ultimate_database: Option<PathBuf>,
    /// Content mirrors, highest priority first.
    pub(crate) file_servers: Vec<String>,
    /// Logo and screenshot mirrors, highest priority first.
    #[serde(default)]
    pub(crate) image_servers: Vec<String>,
    /// Language written to `meta.yaml` when the catalog has none.
    #[serde(default)]
    pub(crate) entry_language: String,
    #[serde(default = "default_output_directory")]
    pub(crate) output_directory: PathBuf,
    #[serde(default = "default_archiver")]
    pub(crate) archiver: PathBuf,
    #[serde(default = "default_connect_timeout_secs")]
    pub(crate) connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub(crate) request_timeout_secs: u64,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)
}

fn default_archiver() -> PathBuf {
    PathBuf::from(DEFAULT_ARCHIVER)
}

fn default_connect_timeout_secs() -> u64 {
    CONNECT_TIMEOUT_SECS
}

fn default_request_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.flashpoint_database.as_os_str().is_empty() {
            bail!("Invalid config value for `FlashpointDatabase`: path is empty");
        }
        if self.file_servers.is_empty() {
            bail!("Invalid config value for `FileServers`: at least one server is required");
        }
        if self.output_directory.as_os_str().is_empty() {
            bail!("Invalid config value for `OutputDirectory`: path is empty");
        }
        if self.archiver.as_os_str().is_empty() {
            bail!("Invalid config value for `Archiver`: path is empty");
        }
        validate_timeout_secs("ConnectTimeoutSecs", self.connect_timeout_secs)?;
        validate_timeout_secs("RequestTimeoutSecs", self.request_timeout_secs)?;
        self.file_mirrors()?;
        self.image_mirrors()?;
        Ok(())
    }

    /// Legacy index path, treating an empty string as unset.
    pub(crate) fn ultimate_database(&self) -> Option<&Path> {
        self.ultimate_database
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    pub(crate) fn file_mirrors(&self) -> Result<MirrorList> {
        MirrorList::new(&self.file_servers).context("Invalid config value for `FileServers`")
    }

    pub(crate) fn image_mirrors(&self) -> Result<MirrorList> {
        MirrorList::new(&self.image_servers).context("Invalid config value for `ImageServers`")
    }
}

fn validate_timeout_secs(field: &str, value: u64) -> Result<()> {
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loads and validates the config file at `path`.
pub(crate) fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config = parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    Ok(serde_json::from_str(raw)?)
}
