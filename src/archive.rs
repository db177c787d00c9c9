//! Packaging a staged curation with an external 7-Zip compatible archiver.
//!
//! The archiver runs inside `<output>/<safe title>` as
//! `<archiver> a -r -ms=on ../<safe title>.7z`, so the archive holds the
//! `<entry id>/` folder at its root.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use crate::curation::CurationLayout;

/// Default archiver executable, looked up on `PATH`.
pub const DEFAULT_ARCHIVER: &str = "7za";

/// Errors from running the archiver.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archiver could not be started.
    #[error("failed to run archiver {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archiver ran but reported failure.
    #[error("archiver {program} exited with {status}: {stderr}")]
    Failed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
}

/// Runs the configured archiver over a curation.
#[derive(Debug, Clone)]
pub struct Archiver {
    program: PathBuf,
}

impl Default for Archiver {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVER)
    }
}

impl Archiver {
    /// Uses `program` as the archiver.
    ///
    /// A relative path with directory components is resolved against the
    /// current directory, since the archiver runs from inside the curation.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let program = if program.is_relative() && program.components().count() > 1 {
            std::path::absolute(&program).unwrap_or(program)
        } else {
            program
        };
        Self { program }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments passed for `layout`.
    #[must_use]
    pub fn arguments(layout: &CurationLayout) -> Vec<String> {
        vec![
            "a".to_string(),
            "-r".to_string(),
            "-ms=on".to_string(),
            format!("../{}", layout.archive_file_name()),
        ]
    }

    /// Archives `layout.title_dir()` into `layout.archive_path()`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Spawn`] if the archiver cannot be started and
    /// [`ArchiveError::Failed`] if it exits unsuccessfully.
    #[instrument(skip(self, layout), fields(program = %self.program.display(), archive = %layout.archive_path().display()))]
    pub async fn archive(&self, layout: &CurationLayout) -> Result<PathBuf, ArchiveError> {
        let output = Command::new(&self.program)
            .args(Self::arguments(layout))
            .current_dir(layout.title_dir())
            .output()
            .await
            .map_err(|source| ArchiveError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!(stdout = %String::from_utf8_lossy(&output.stdout), "archiver output");

        if !output.status.success() {
            return Err(ArchiveError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let archive_path = layout.archive_path();
        info!(path = %archive_path.display(), "archive created");
        Ok(archive_path)
    }
}
