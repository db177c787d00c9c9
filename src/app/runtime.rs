use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use gamezipper_core::{
    Archiver, CurationLayout, Database, HttpClient, LegacyIndex, MirrorFetcher, PathSet,
    RawReference, ResolvedPath, SqliteCatalog, SqliteLegacyIndex, fetch_images, load_entry,
};
use tracing::{debug, info, warn};

use crate::app::{config, input_processor, progress_manager, terminal};
use crate::cli::Args;

/// Packages `entry_id` end to end.
///
/// Every input error is detected before anything is written: the entry must
/// exist, not be converted already, and resolve to at least one path.
pub(crate) async fn run_gamezipper(args: &Args, entry_id: &str) -> Result<()> {
    let config = config::load_file_config(&args.config)?;
    let file_mirrors = config.file_mirrors()?;
    let image_mirrors = config.image_mirrors()?;
    let output_root = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_directory.clone());

    let catalog_db = Database::open_read_only(&config.flashpoint_database)
        .await
        .with_context(|| {
            format!(
                "Failed to open catalog database '{}'",
                config.flashpoint_database.display()
            )
        })?;
    let catalog = SqliteCatalog::new(catalog_db);
    let record = load_entry(&catalog, entry_id).await?;
    info!(title = %record.entry.title, "Entry found");

    let references = input_processor::collect_references(&record, &args.sources);
    let paths = resolve_paths(&references, config.ultimate_database()).await?;
    info!(paths = paths.len(), "Resolved files to download");

    let layout = CurationLayout::new(&output_root, &record.entry.title, &record.entry.id);
    layout.prepare().await?;
    layout
        .write_meta(&record, &config.entry_language)
        .await?;
    info!(path = %layout.entry_dir().display(), "Curation directory ready");

    let client = HttpClient::with_timeouts(config.connect_timeout_secs, config.request_timeout_secs)?;
    let fetcher = MirrorFetcher::new(client);

    fetch_images(&fetcher, &image_mirrors, &layout, &record.entry.id).await;

    let use_progress = terminal::should_use_progress_bar(
        io::stderr().is_terminal(),
        args.quiet,
        terminal::is_dumb_terminal(),
    );
    let bar = progress_manager::content_progress(use_progress, paths.len());
    let report = fetcher
        .fetch_with_progress(&paths, &file_mirrors, &layout.content_dir(), |path, outcome| {
            progress_manager::record_outcome(&bar, path, outcome);
        })
        .await;
    bar.finish_and_clear();

    info!(
        fetched = report.fetched(),
        skipped = report.skipped(),
        failed = report.failed(),
        total = report.total(),
        "Download complete"
    );
    for path in report.failed_paths() {
        warn!(path = %path, "Not retrieved from any server");
    }

    if args.no_archive {
        info!("Skipping archive (--no-archive)");
        return Ok(());
    }

    let archive_path = Archiver::new(&config.archiver)
        .archive(&layout)
        .await
        .context("Failed to archive curation; the assembled directory was kept")?;
    info!(path = %archive_path.display(), "Done");
    Ok(())
}

/// Resolves references into the final path list.
///
/// The legacy index is opened only when at least one wildcard is present.
async fn resolve_paths(
    references: &[RawReference],
    legacy_db: Option<&Path>,
) -> Result<Vec<ResolvedPath>> {
    let index = match legacy_db {
        Some(path) if references.iter().any(RawReference::is_wildcard) => {
            let db = Database::open_read_only(path).await.with_context(|| {
                format!("Failed to open legacy index database '{}'", path.display())
            })?;
            Some(SqliteLegacyIndex::new(db))
        }
        _ => None,
    };

    let mut set = PathSet::new();
    for reference in references {
        let added = set
            .add_reference(reference, index.as_ref().map(|i| i as &dyn LegacyIndex))
            .await
            .with_context(|| {
                if reference.is_wildcard() && index.is_none() {
                    "Wildcard patterns require `UltimateDatabase` in the config".to_string()
                } else {
                    format!("Failed to resolve '{}'", reference.as_str())
                }
            })?;
        debug!(reference = reference.as_str(), added, "Reference resolved");
    }

    Ok(set.finalize()?)
}
