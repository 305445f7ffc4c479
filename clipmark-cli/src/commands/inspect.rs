//! Inspect command implementation

use anyhow::{Context, Result};
use clipmark_core::{
    Book, HighlightBookmarkMerger, JsonSidecarStore, SidecarStore, TitleAuthorExtractor,
};
use std::path::Path;

/// Parse a single sidecar file and print its normalized entries
pub fn inspect(sidecar: &str, doc: Option<&str>) -> Result<()> {
    let sidecar_path = Path::new(sidecar);
    let data = JsonSidecarStore::new()
        .load(sidecar_path)
        .with_context(|| format!("Failed to load sidecar {}", sidecar))?;

    // Resolve the title from the document name when given, otherwise from
    // the sidecar's own stem
    let fallback = doc
        .map(|d| {
            Path::new(d)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| d.to_string())
        })
        .unwrap_or_else(|| {
            sidecar_path
                .file_stem()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    let (title, author) = TitleAuthorExtractor::new().extract(&fallback, None);
    let file = doc.map(Path::new).unwrap_or(sidecar_path);

    let mut book = Book::new(file, title, author);
    HighlightBookmarkMerger::new().merge(&data.highlight, &data.bookmarks, &mut book);

    println!("{}", serde_json::to_string_pretty(&book)?);
    Ok(())
}
