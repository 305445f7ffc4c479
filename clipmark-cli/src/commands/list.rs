//! List command implementation

use anyhow::Result;

/// List annotated books and their entry counts
pub fn list(legacy_dir: Option<&str>, registry: Option<&str>) -> Result<()> {
    let books = super::aggregate(legacy_dir, registry)?;

    if books.is_empty() {
        println!("No annotated books found");
        return Ok(());
    }

    for book in books.values() {
        let author = book.author.as_deref().unwrap_or("unknown author");
        println!("{} ({}) - {} entries", book.title, author, book.entries.len());
    }

    Ok(())
}
