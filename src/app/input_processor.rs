//! Assembly of raw references from the catalog entry and CLI sources.

use std::fs;

use gamezipper_core::paths::{HTTP_SCHEME, RawReference};
use gamezipper_core::EntryRecord;
use tracing::debug;

/// Expands one CLI source argument into reference strings.
///
/// Arguments starting with `http://` are literals. Anything else is first read
/// as a text file with one reference per line (blank lines skipped); if it
/// cannot be read, the argument itself is the reference.
pub(crate) fn expand_source_arg(arg: &str) -> Vec<String> {
    if arg.starts_with(HTTP_SCHEME) {
        return vec![arg.to_string()];
    }

    match fs::read_to_string(arg) {
        Ok(contents) => {
            let lines: Vec<String> = contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
            debug!(file = arg, references = lines.len(), "read source file");
            lines
        }
        Err(e) => {
            debug!(source = arg, error = %e, "not a readable file, using as a literal");
            vec![arg.to_string()]
        }
    }
}

/// Collects every raw reference for a run: the entry's own launch commands
/// first, then CLI sources in the order given.
///
/// Catalog launch commands are always literals; only CLI sources can be
/// wildcard patterns.
pub(crate) fn collect_references(record: &EntryRecord, sources: &[String]) -> Vec<RawReference> {
    record
        .content_references()
        .into_iter()
        .map(|command| RawReference::Literal(command.to_string()))
        .chain(
            sources
                .iter()
                .flat_map(|arg| expand_source_arg(arg))
                .map(RawReference::classify),
        )
        .collect()
}
