//! Merging raw highlight/bookmark data into normalized book entries

use crate::parse::TimeParser;
use crate::render::{DocumentRenderer, ImageClipRequester};
use crate::types::{
    Book, Entry, EntryCategory, Image, PageBox, Position, RawBookmarkItem, RawHighlightItem,
};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Builds per-book annotation records from raw highlight/bookmark data
///
/// For every raw highlight item this constructs a candidate entry, attaches
/// the note of a bookmark recorded at the same instant, renders an image
/// clip for position-only highlights, drops candidates with no content, and
/// finally sorts the book's entries ascending by page.
pub struct HighlightBookmarkMerger {
    time: TimeParser,
    clip: Option<ImageClipRequester>,
    // Auto-generated bookmark text: "Page <ref> <quoted> @ <Y-M-D H:M:S>",
    // where <ref> is plain digits or a reflow-mode "[N]M" form
    bookmark_quote: Regex,
}

impl HighlightBookmarkMerger {
    pub fn new() -> Self {
        Self {
            time: TimeParser::new(),
            clip: None,
            bookmark_quote: Regex::new(r"^Page \[?\d+\]?\d* (.*) @ \d+-\d+-\d+ \d+:\d+:\d+$")
                .expect("valid pattern"),
        }
    }

    /// Enable image clips for position-only highlights
    pub fn with_renderer(renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            clip: Some(ImageClipRequester::new(renderer)),
            ..Self::new()
        }
    }

    /// Merge raw annotation data into `book.entries`
    pub fn merge(
        &self,
        highlights: &BTreeMap<u32, Vec<RawHighlightItem>>,
        bookmarks: &[RawBookmarkItem],
        book: &mut Book,
    ) {
        for (&page, items) in highlights {
            for item in items {
                let text = match item {
                    RawHighlightItem::Text { text, .. } => text.trim().to_string(),
                    RawHighlightItem::Positional { .. } => String::new(),
                };

                let mut entry = Entry {
                    page,
                    category: EntryCategory::Highlight,
                    time: self.time.parse(item.datetime()),
                    text,
                    chapter: item.chapter().map(str::to_string),
                    note: None,
                    image: None,
                };

                self.attach_bookmark_note(item, bookmarks, &mut entry);

                if entry.text.is_empty() {
                    if let RawHighlightItem::Positional {
                        pos0,
                        pos1,
                        pboxes,
                        drawer,
                        ..
                    } = item
                    {
                        entry.image =
                            self.request_image(book, page, pos0, pos1, pboxes, drawer.as_deref());
                    }
                }

                if entry.has_content() {
                    book.add_entry(entry);
                }
            }
        }

        book.sort_entries();
        debug!(title = %book.title, entries = book.entries.len(), "merged annotations");
    }

    /// Attach the note of a bookmark recorded at the same instant
    ///
    /// The reader auto-generates bookmark text from the highlighted quote;
    /// when the templated form matches, the captured quote is the note,
    /// otherwise the raw bookmark text is. A note that merely echoes the
    /// highlight is never attached. Bookmarks are scanned in stored order
    /// and a later match overwrites an earlier note.
    fn attach_bookmark_note(
        &self,
        item: &RawHighlightItem,
        bookmarks: &[RawBookmarkItem],
        entry: &mut Entry,
    ) {
        for bookmark in bookmarks {
            let Some(raw) = bookmark.text.as_deref() else {
                continue;
            };
            if raw.is_empty() || bookmark.datetime != item.datetime() {
                continue;
            }

            let quote = self
                .bookmark_quote
                .captures(raw)
                .map(|caps| caps[1].to_string());
            if quote.as_deref() != Some(entry.text.as_str()) && raw != entry.text {
                entry.note = Some(quote.unwrap_or_else(|| raw.to_string()));
            }
        }
    }

    /// Render an image clip for a position-only highlight
    ///
    /// Reflow-mode coordinates may lack an explicit page; it defaults to the
    /// page the item was stored under.
    fn request_image(
        &self,
        book: &Book,
        page: u32,
        pos0: &Position,
        pos1: &Position,
        pboxes: &[PageBox],
        drawer: Option<&str>,
    ) -> Option<Image> {
        let clip = self.clip.as_ref()?;

        let mut pos0 = pos0.clone();
        let mut pos1 = pos1.clone();
        pos0.page.get_or_insert(page);
        pos1.page.get_or_insert(page);

        clip.request_clip(&book.file, &pos0, &pos1, pboxes, drawer)
    }
}

impl Default for HighlightBookmarkMerger {
    fn default() -> Self {
        Self::new()
    }
}
