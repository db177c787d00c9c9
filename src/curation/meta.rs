//! `meta.yaml` rendering.
//!
//! The document is line-oriented YAML in the layout the curation importer
//! expects. Values that YAML would misread are adjusted by [`sanitize_scalar`].

use crate::catalog::{AdditionalAppKind, EntryRecord};

/// Note recorded on every converted entry.
pub const CURATION_NOTES: &str = "GameZIP conversion";

/// Category assigned to every tag.
const DEFAULT_TAG_CATEGORY: &str = "default";

/// Separator between tags in the catalog's tag string.
const TAG_SEPARATOR: &str = "; ";

/// Makes a scalar safe to emit unquoted.
///
/// Empty values become `""`; values wrapped in double quotes are wrapped once
/// more in single quotes so the quotes survive parsing.
#[must_use]
pub fn sanitize_scalar(value: &str) -> String {
    if value.is_empty() {
        "\"\"".to_string()
    } else if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        format!("'{value}'")
    } else {
        value.to_string()
    }
}

/// Renders the metadata document for an entry.
///
/// `default_language` replaces an empty catalog language when non-empty.
#[must_use]
pub fn render_meta(record: &EntryRecord, default_language: &str) -> String {
    let entry = &record.entry;

    let release_date = if entry.release_date.chars().count() == 4 {
        format!("\"{}\"", entry.release_date)
    } else {
        entry.release_date.clone()
    };
    let language = if entry.language.is_empty() && !default_language.is_empty() {
        default_language
    } else {
        entry.language.as_str()
    };
    // One category per tag; an empty tag string still counts as one tag.
    let tag_categories = entry
        .tags
        .split(TAG_SEPARATOR)
        .map(|_| DEFAULT_TAG_CATEGORY)
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR);

    let mut lines = vec![
        format!("Title: {}", sanitize_scalar(&entry.title)),
        format!("Library: {}", entry.library),
        format!("Play Mode: {}", entry.play_mode),
        format!("Release Date: {release_date}"),
        format!("Languages: {}", sanitize_scalar(language)),
        format!("Tags: {}", entry.tags),
        format!("Tag Categories: {tag_categories}"),
        format!("Source: {}", sanitize_scalar(&entry.source)),
        format!("Primary Platform: {}", entry.platform_name),
        format!("Platforms: {}", entry.platforms),
        format!("Status: {}", entry.status),
        format!("Application Path: {}", sanitize_scalar(&entry.application_path)),
        format!("Launch Command: {}", sanitize_scalar(&entry.launch_command)),
        format!("Curation Notes: {CURATION_NOTES}"),
        format!("UUID: {}", entry.id),
        "Group: \"\"".to_string(),
    ];

    let apps: Vec<_> = record
        .additional_apps
        .iter()
        .filter(|app| app.is_complete())
        .collect();

    if apps.is_empty() {
        lines.push("Additional Applications: {}".to_string());
    } else {
        lines.push("Additional Applications:".to_string());
        for app in apps {
            match app.kind() {
                AdditionalAppKind::Message => {
                    lines.push(format!("  Message: {}", app.launch_command));
                }
                AdditionalAppKind::Extras => {
                    lines.push(format!("  Extras: {}", app.launch_command));
                }
                AdditionalAppKind::Launch => {
                    lines.push(format!("  {}:", app.name));
                    lines.push(format!("    Heading: {}", app.name));
                    lines.push(format!("    Application Path: {}", app.application_path));
                    lines.push(format!("    Launch Command: {}", app.launch_command));
                }
            }
        }
    }

    let mut document = lines.join("\n");
    document.push('\n');
    document
}
