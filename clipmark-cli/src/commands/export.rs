//! Export command implementation

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Export all annotations from the configured history origins as JSON
pub fn export(
    legacy_dir: Option<&str>,
    registry: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    // Set up progress spinner
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Aggregating annotations...");

    let books = super::aggregate(legacy_dir, registry)?;

    let entries: usize = books.values().map(|b| b.entries.len()).sum();
    pb.finish_with_message(format!(
        "Collected {} entries from {} books",
        entries,
        books.len()
    ));

    tracing::info!(books = books.len(), entries, "export complete");

    super::write_json(&books, output)
}
