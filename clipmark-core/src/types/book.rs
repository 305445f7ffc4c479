//! The Book type and its normalized annotation entries

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A book together with its normalized, page-ordered annotation records
///
/// Created when a book's sidecar data is first successfully parsed and
/// mutated only by appending entries during merging. After merging completes
/// the entries are sorted ascending by page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Path to the document file
    pub file: PathBuf,

    /// Book title (also the key in the aggregate collection)
    pub title: String,

    /// Author, when the filename or document metadata yielded one
    pub author: Option<String>,

    /// Normalized annotation records
    pub entries: Vec<Entry>,
}

impl Book {
    /// Create a book with no entries
    pub fn new(
        file: impl Into<PathBuf>,
        title: impl Into<String>,
        author: Option<String>,
    ) -> Self {
        Self {
            file: file.into(),
            title: title.into(),
            author,
            entries: Vec::new(),
        }
    }

    /// Append a normalized entry
    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Stable-sort entries ascending by page
    pub fn sort_entries(&mut self) {
        self.entries.sort_by_key(|e| e.page);
    }
}

/// Classification of an annotation record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryCategory {
    Highlight,
    Note,
    Bookmark,
}

/// A single normalized annotation record
///
/// Immutable once constructed. Every materialized entry has non-empty `text`
/// or a present `image`; candidates failing this are discarded before they
/// reach a [`Book`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// Page the annotation lives on
    pub page: u32,

    /// Annotation category
    pub category: EntryCategory,

    /// Epoch seconds (local timezone) the annotation was made, when parsable
    pub time: Option<i64>,

    /// Highlighted or noted text (may be empty for image-only highlights)
    pub text: String,

    /// Chapter title, when the reader recorded one
    pub chapter: Option<String>,

    /// Attached bookmark note, when one matched and did not echo the text
    pub note: Option<String>,

    /// Rendered clip for position-only highlights
    pub image: Option<Image>,
}

impl Entry {
    /// Whether this entry carries any exportable content
    pub fn has_content(&self) -> bool {
        !self.text.is_empty() || self.image.is_some()
    }
}

/// A rendered image clip of a highlighted region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// Raw image payload
    #[serde(with = "base64_serde")]
    pub data: Vec<u8>,

    /// Hex-encoded SHA-256 digest of `data`, used for identity/dedup
    pub hash: String,
}

impl Image {
    /// Create an image clip, computing its content hash
    pub fn new(data: Vec<u8>) -> Self {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(&data);
        let hash = hex::encode(hasher.finalize());

        Self { data, hash }
    }
}

/// Base64 serialization for binary data
mod base64_serde {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
