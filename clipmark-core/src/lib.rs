//! Clipmark Core Library
//!
//! This crate extracts reading annotations — highlights, notes, and bookmarks —
//! recorded by a document reader and normalizes them into a per-book,
//! page-ordered collection of annotation records suitable for export.
//!
//! The engine reconciles loosely structured input (filenames, free-text
//! timestamps in several calendar notations, auto-generated bookmark strings)
//! into a single consistent model. Storage enumeration, sidecar decoding, and
//! document rendering are consumed through narrow traits so the engine stays
//! independent of any particular reader.

pub mod aggregate;
pub mod error;
pub mod flatfile;
pub mod merge;
pub mod parse;
pub mod render;
pub mod sidecar;
pub mod source;
pub mod types;

pub use aggregate::{AggregatorConfig, ClippingAggregator};
pub use error::{ClipmarkError, Result, SidecarError};
pub use flatfile::FlatClippingsParser;
pub use merge::HighlightBookmarkMerger;
pub use parse::{ClassifiedInfo, EntryClassifier, TimeParser, TitleAuthorExtractor};
pub use render::{DocProps, DocumentHandle, DocumentRenderer, ImageClipRequester};
pub use sidecar::{JsonSidecarStore, SidecarStore};
pub use source::{FsHistorySource, HistoryEntry, HistorySource};
pub use types::{
    Book, Entry, EntryCategory, Image, PageBox, Position, RawBookmarkItem, RawHighlightItem,
    SidecarData,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let book = Book::new("/books/test.epub", "Test Book", None);
        assert_eq!(book.title, "Test Book");
        assert!(book.entries.is_empty());
    }
}
