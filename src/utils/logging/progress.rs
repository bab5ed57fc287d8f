//! Progress reporting for long-running ingestion
//!
//! Thin wrappers around indicatif with the styles used across the crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Row count from which ingestion shows a visible progress bar
pub const PROGRESS_MIN_ROWS: usize = 10_000;

/// Default style for a row progress bar
pub const DEFAULT_ROW_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create a progress bar over `length` rows.
///
/// Inputs shorter than [`PROGRESS_MIN_ROWS`] get a hidden bar so callers can
/// tick it unconditionally.
#[must_use]
pub fn create_row_progress_bar(length: usize, description: Option<&str>) -> ProgressBar {
    if length < PROGRESS_MIN_ROWS {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(length as u64);
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_ROW_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar with an optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
