//! Progress bar for the content fetch loop.

use gamezipper_core::{FetchOutcome, ResolvedPath};
use indicatif::{ProgressBar, ProgressStyle};

/// Creates the content progress bar, or a hidden one when disabled.
pub(crate) fn content_progress(enabled: bool, total: usize) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(u64::try_from(total).unwrap_or(u64::MAX));
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Advances the bar by one finished path.
pub(crate) fn record_outcome(bar: &ProgressBar, path: &ResolvedPath, outcome: &FetchOutcome) {
    let label = match outcome {
        FetchOutcome::Skipped => "skipped",
        FetchOutcome::Fetched { .. } => "fetched",
        FetchOutcome::Failed(_) => "failed",
    };
    bar.set_message(format!("{label} {path}"));
    bar.inc(1);
}
