//! Core data model for normalized annotations

mod book;
mod raw;

pub use book::{Book, Entry, EntryCategory, Image};
pub use raw::{PageBox, Position, RawBookmarkItem, RawHighlightItem, RawHighlightRecord, SidecarData};
