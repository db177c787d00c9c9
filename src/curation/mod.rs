//! Curation directory layout and assembly.
//!
//! An entry is staged as:
//!
//! ```text
//! <output>/<safe title>/<entry id>/
//!     meta.yaml
//!     logo.png
//!     ss.png
//!     content/<host>/<path...>
//! ```
//!
//! and the `<safe title>` directory is what gets archived into
//! `<output>/<safe title>.7z`.

mod error;
mod images;
mod meta;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use error::CurationError;
pub use images::{ImageAsset, fetch_images};
pub use meta::{CURATION_NOTES, render_meta, sanitize_scalar};

use crate::catalog::EntryRecord;

/// Name of the metadata file inside the entry directory.
pub const META_FILE_NAME: &str = "meta.yaml";

/// Name of the folder holding retrieved content.
pub const CONTENT_DIR_NAME: &str = "content";

/// Extension of the archive produced for a curation.
pub const ARCHIVE_EXTENSION: &str = "7z";

const FORBIDDEN_DIR_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Makes a title usable as a single directory name.
///
/// Characters reserved by common filesystems and control characters are
/// dropped, surrounding whitespace and trailing dots are trimmed. Falls back to
/// `fallback` if nothing usable remains.
#[must_use]
pub fn sanitize_dir_name(title: &str, fallback: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !c.is_control() && !FORBIDDEN_DIR_CHARS.contains(c))
        .collect();
    let cleaned = cleaned.trim().trim_end_matches('.').trim_end();

    if cleaned.is_empty() || cleaned == "." {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Filesystem locations for one entry's curation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurationLayout {
    output_root: PathBuf,
    safe_title: String,
    title_dir: PathBuf,
    entry_dir: PathBuf,
}

impl CurationLayout {
    /// Computes the layout for an entry; nothing is created on disk.
    pub fn new(output_root: impl Into<PathBuf>, title: &str, entry_id: &str) -> Self {
        let output_root = output_root.into();
        let safe_title = sanitize_dir_name(title, entry_id);
        let title_dir = output_root.join(&safe_title);
        let entry_dir = title_dir.join(entry_id);
        Self {
            output_root,
            safe_title,
            title_dir,
            entry_dir,
        }
    }

    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    #[must_use]
    pub fn safe_title(&self) -> &str {
        &self.safe_title
    }

    /// Directory that is archived: `<output>/<safe title>`.
    #[must_use]
    pub fn title_dir(&self) -> &Path {
        &self.title_dir
    }

    /// `<output>/<safe title>/<entry id>`.
    #[must_use]
    pub fn entry_dir(&self) -> &Path {
        &self.entry_dir
    }

    #[must_use]
    pub fn content_dir(&self) -> PathBuf {
        self.entry_dir.join(CONTENT_DIR_NAME)
    }

    #[must_use]
    pub fn meta_path(&self) -> PathBuf {
        self.entry_dir.join(META_FILE_NAME)
    }

    /// Archive file name, relative to the output root.
    #[must_use]
    pub fn archive_file_name(&self) -> String {
        format!("{}.{ARCHIVE_EXTENSION}", self.safe_title)
    }

    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.output_root.join(self.archive_file_name())
    }

    /// Creates the entry and content directories.
    ///
    /// # Errors
    ///
    /// Returns [`CurationError::Io`] if a directory cannot be created.
    pub async fn prepare(&self) -> Result<(), CurationError> {
        let content_dir = self.content_dir();
        tokio::fs::create_dir_all(&content_dir)
            .await
            .map_err(|e| CurationError::io(&content_dir, e))?;
        debug!(path = %self.entry_dir.display(), "curation directory ready");
        Ok(())
    }

    /// Renders and writes `meta.yaml`, replacing any previous copy.
    ///
    /// # Errors
    ///
    /// Returns [`CurationError::Io`] if the file cannot be written.
    pub async fn write_meta(
        &self,
        record: &EntryRecord,
        default_language: &str,
    ) -> Result<PathBuf, CurationError> {
        let meta_path = self.meta_path();
        let document = render_meta(record, default_language);
        tokio::fs::write(&meta_path, document)
            .await
            .map_err(|e| CurationError::io(&meta_path, e))?;
        Ok(meta_path)
    }
}
