//! Mapping server-relative paths onto the local filesystem.

use std::path::{Component, Path, PathBuf};

use super::error::FetchError;

/// Maps a `/`-separated relative path to a file location under `root`.
///
/// Empty and `.` segments are dropped. A segment that would leave `root`
/// (`..`, a drive prefix, an embedded separator of the host platform) makes
/// the whole path malformed.
///
/// # Errors
///
/// Returns [`FetchError::MalformedPath`] if the path cannot be represented.
pub fn destination_for(root: &Path, relative: &str) -> Result<PathBuf, FetchError> {
    let mut destination = root.to_path_buf();
    let mut segments = 0usize;

    for segment in relative.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment.contains('\0') {
            return Err(FetchError::malformed_path(relative, "contains a NUL byte"));
        }

        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => destination.push(part),
            (Some(Component::ParentDir), None) => {
                return Err(FetchError::malformed_path(relative, "escapes destination"));
            }
            _ => {
                return Err(FetchError::malformed_path(
                    relative,
                    "segment is not a plain file name",
                ));
            }
        }
        segments += 1;
    }

    if segments == 0 {
        return Err(FetchError::malformed_path(relative, "has no file name"));
    }

    Ok(destination)
}
