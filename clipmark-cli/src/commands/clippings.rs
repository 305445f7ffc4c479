//! Clippings command implementation

use anyhow::{Context, Result};
use clipmark_core::FlatClippingsParser;
use std::path::Path;

/// Parse a flat "My Clippings"-style export
pub fn clippings(input: &str, output: Option<&str>) -> Result<()> {
    let books = FlatClippingsParser::new()
        .parse_file(Path::new(input))
        .with_context(|| format!("Failed to read clippings file {}", input))?;

    tracing::info!(books = books.len(), "parsed clippings file");

    super::write_json(&books, output)
}
