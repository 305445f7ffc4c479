//! Sidecar payload loading

use crate::error::SidecarError;
use crate::types::{RawBookmarkItem, RawHighlightRecord, SidecarData};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Loads a book's persisted annotation payload
///
/// Implementations fail safely: malformed or empty content is an error the
/// aggregator logs and skips, never a panic and never a partial payload.
pub trait SidecarStore {
    fn load(&self, path: &Path) -> Result<SidecarData, SidecarError>;
}

/// On-disk shape of a JSON sidecar document
#[derive(Debug, Deserialize)]
struct RawSidecarDoc {
    #[serde(default)]
    highlight: BTreeMap<u32, Vec<RawHighlightRecord>>,
    #[serde(default)]
    bookmarks: Vec<RawBookmarkItem>,
}

/// Reference store for sidecar payloads persisted as JSON documents
///
/// Loose highlight records are resolved into their tagged shape here, at
/// ingestion, so the rest of the engine never sees optional position fields.
#[derive(Debug, Default)]
pub struct JsonSidecarStore;

impl JsonSidecarStore {
    pub fn new() -> Self {
        Self
    }
}

impl SidecarStore for JsonSidecarStore {
    fn load(&self, path: &Path) -> Result<SidecarData, SidecarError> {
        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Err(SidecarError::Empty);
        }

        let doc: RawSidecarDoc =
            serde_json::from_str(&raw).map_err(|e| SidecarError::Malformed(e.to_string()))?;

        Ok(SidecarData {
            highlight: doc
                .highlight
                .into_iter()
                .map(|(page, records)| {
                    (
                        page,
                        records.into_iter().map(RawHighlightRecord::resolve).collect(),
                    )
                })
                .collect(),
            bookmarks: doc.bookmarks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawHighlightItem;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_sidecar(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_resolves_records() {
        let file = write_sidecar(
            r#"{
                "highlight": {
                    "12": [
                        {"text": "quoted", "datetime": "2020-05-01 10:00:00", "chapter": "One"},
                        {"datetime": "2020-05-01 11:00:00",
                         "pos0": {"x": 1.0, "y": 2.0},
                         "pos1": {"page": 12, "x": 3.0, "y": 4.0},
                         "drawer": "lighten"}
                    ]
                },
                "bookmarks": [
                    {"datetime": "2020-05-01 10:00:00", "text": "a note"}
                ]
            }"#,
        );

        let data = JsonSidecarStore::new().load(file.path()).unwrap();
        let items = &data.highlight[&12];
        assert!(matches!(items[0], RawHighlightItem::Text { .. }));
        assert!(matches!(items[1], RawHighlightItem::Positional { .. }));
        assert_eq!(data.bookmarks.len(), 1);
    }

    #[test]
    fn test_missing_sections_default() {
        let file = write_sidecar("{}");
        let data = JsonSidecarStore::new().load(file.path()).unwrap();
        assert!(data.highlight.is_empty());
        assert!(data.bookmarks.is_empty());
    }

    #[test]
    fn test_empty_payload_is_error() {
        let file = write_sidecar("   \n");
        assert!(matches!(
            JsonSidecarStore::new().load(file.path()),
            Err(SidecarError::Empty)
        ));
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let file = write_sidecar("{ not json");
        assert!(matches!(
            JsonSidecarStore::new().load(file.path()),
            Err(SidecarError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            JsonSidecarStore::new().load(Path::new("/nonexistent/sidecar.json")),
            Err(SidecarError::Io(_))
        ));
    }
}
