//! Raw annotation records as persisted by the reader
//!
//! These are read-only inputs. The reader stores highlight items as loose
//! records with optional fields; [`RawHighlightRecord`] mirrors that shape
//! for deserialization and is resolved once, at ingestion, into the tagged
//! [`RawHighlightItem`] so downstream code never checks optional fields
//! ad hoc.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A coordinate within a document, as recorded by the reader
///
/// `page` may be absent for reflow-mode coordinates; the merger defaults it
/// to the page the item was stored under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub page: Option<u32>,
    pub x: f64,
    pub y: f64,
}

/// A per-page bounding box for a highlighted region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageBox {
    pub page: Option<u32>,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A raw highlight item, resolved into one of two shapes at ingestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RawHighlightItem {
    /// A highlight carrying selected text
    Text {
        text: String,
        datetime: String,
        chapter: Option<String>,
    },

    /// A position-only highlight; its content is a rendered image clip
    Positional {
        datetime: String,
        chapter: Option<String>,
        pos0: Position,
        pos1: Position,
        pboxes: Vec<PageBox>,
        drawer: Option<String>,
    },
}

impl RawHighlightItem {
    /// Timestamp string as recorded by the reader
    pub fn datetime(&self) -> &str {
        match self {
            RawHighlightItem::Text { datetime, .. } => datetime,
            RawHighlightItem::Positional { datetime, .. } => datetime,
        }
    }

    /// Chapter title, when recorded
    pub fn chapter(&self) -> Option<&str> {
        match self {
            RawHighlightItem::Text { chapter, .. } => chapter.as_deref(),
            RawHighlightItem::Positional { chapter, .. } => chapter.as_deref(),
        }
    }
}

/// The loose on-disk shape of a highlight record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawHighlightRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub pos0: Option<Position>,
    #[serde(default)]
    pub pos1: Option<Position>,
    #[serde(default)]
    pub pboxes: Vec<PageBox>,
    #[serde(default)]
    pub drawer: Option<String>,
}

impl RawHighlightRecord {
    /// Resolve the loose record into its tagged shape
    ///
    /// A record with empty text and both positions is positional; everything
    /// else is text (possibly empty, filtered out later by the merger).
    pub fn resolve(self) -> RawHighlightItem {
        if self.text.is_empty() {
            if let (Some(pos0), Some(pos1)) = (self.pos0, self.pos1) {
                return RawHighlightItem::Positional {
                    datetime: self.datetime,
                    chapter: self.chapter,
                    pos0,
                    pos1,
                    pboxes: self.pboxes,
                    drawer: self.drawer,
                };
            }
        }
        RawHighlightItem::Text {
            text: self.text,
            datetime: self.datetime,
            chapter: self.chapter,
        }
    }
}

/// A raw bookmark record as persisted by the reader
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawBookmarkItem {
    #[serde(default)]
    pub datetime: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// A book's sidecar annotation payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidecarData {
    /// Raw highlight items grouped by the page they were stored under
    pub highlight: BTreeMap<u32, Vec<RawHighlightItem>>,

    /// Raw bookmark items, in stored order
    pub bookmarks: Vec<RawBookmarkItem>,
}
