//! Title/author extraction from filenames and document metadata

use crate::render::DocumentRenderer;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

/// Known document-extension suffixes, checked case-insensitively against the
/// trailing 4 or 5 characters of a filename stem. Strips legacy
/// double-extension artifacts left behind by older reader versions.
const DOC_SUFFIXES: &[&str] = &[
    ".pdf", ".djvu", ".epub", ".fb2", ".mobi", ".txt", ".html", ".doc",
];

/// Derives (title, author) from a filename or document metadata
///
/// Document metadata always wins over filename heuristics: when a document
/// path is supplied and the renderer yields a non-empty metadata title, that
/// title and its metadata author are returned unchanged.
pub struct TitleAuthorExtractor {
    paren: Regex,
    dashed: Regex,
    renderer: Option<Arc<dyn DocumentRenderer>>,
}

impl TitleAuthorExtractor {
    pub fn new() -> Self {
        Self {
            // Shortest title, parenthesized author at the end
            paren: Regex::new(r"^(.*?)\s*\((.*)\)").expect("valid pattern"),
            // Spaced dash only, so hyphenated titles stay whole
            dashed: Regex::new(r"^(.*?)\s+-\s+(.*)$").expect("valid pattern"),
            renderer: None,
        }
    }

    /// Enable metadata lookup through the given renderer
    pub fn with_renderer(renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            renderer: Some(renderer),
            ..Self::new()
        }
    }

    /// Extract (title, author) — infallible, always returns a result
    pub fn extract(&self, fallback_line: &str, doc_path: Option<&Path>) -> (String, Option<String>) {
        if let Some(path) = doc_path {
            if let Some(resolved) = self.from_metadata(path) {
                return resolved;
            }
        }

        let line = strip_doc_suffix(fallback_line.trim());

        if let Some(caps) = self.paren.captures(line) {
            let author = caps[2].trim().to_string();
            return (
                caps[1].trim().to_string(),
                (!author.is_empty()).then_some(author),
            );
        }
        if let Some(caps) = self.dashed.captures(line) {
            let author = caps[2].trim().to_string();
            return (
                caps[1].trim().to_string(),
                (!author.is_empty()).then_some(author),
            );
        }

        (line.to_string(), None)
    }

    /// Scoped metadata lookup; the document handle is dropped before return
    fn from_metadata(&self, path: &Path) -> Option<(String, Option<String>)> {
        let renderer = self.renderer.as_ref()?;
        let mut handle = renderer.open(path)?;
        // A failed metadata load means no further calls on this handle
        let props = handle.metadata_props()?;

        let title = props
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())?;
        let author = props
            .authors
            .or(props.author)
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        Some((title, author))
    }
}

impl Default for TitleAuthorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a trailing document extension (4- or 5-character suffix)
fn strip_doc_suffix(line: &str) -> &str {
    for take in [4usize, 5] {
        if let Some(idx) = tail_start(line, take) {
            let suffix = line[idx..].to_lowercase();
            if DOC_SUFFIXES.contains(&suffix.as_str()) {
                return &line[..idx];
            }
        }
    }
    line
}

/// Byte index where the trailing `chars` characters begin, if that many exist
fn tail_start(line: &str, chars: usize) -> Option<usize> {
    line.char_indices().rev().nth(chars - 1).map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DocProps, DocumentHandle};
    use crate::types::{PageBox, Position};

    #[test]
    fn test_parenthesized_author() {
        let extractor = TitleAuthorExtractor::new();
        assert_eq!(
            extractor.extract("MyBook(Jane Doe)", None),
            ("MyBook".to_string(), Some("Jane Doe".to_string()))
        );
    }

    #[test]
    fn test_dashed_author() {
        let extractor = TitleAuthorExtractor::new();
        assert_eq!(
            extractor.extract("MyBook - Jane Doe", None),
            ("MyBook".to_string(), Some("Jane Doe".to_string()))
        );
    }

    #[test]
    fn test_extension_stripped() {
        let extractor = TitleAuthorExtractor::new();
        assert_eq!(extractor.extract("MyBook.pdf", None), ("MyBook".to_string(), None));
        assert_eq!(extractor.extract("MyBook.EPUB", None), ("MyBook".to_string(), None));
        assert_eq!(
            extractor.extract("MyBook.djvu", None),
            ("MyBook".to_string(), None)
        );
    }

    #[test]
    fn test_double_extension_artifact() {
        let extractor = TitleAuthorExtractor::new();
        // The visible stem of "MyBook.pdf.sdr" style artifacts
        assert_eq!(
            extractor.extract(" MyBook(Jane Doe).pdf ", None),
            ("MyBook".to_string(), Some("Jane Doe".to_string()))
        );
    }

    #[test]
    fn test_hyphenated_title_stays_whole() {
        let extractor = TitleAuthorExtractor::new();
        assert_eq!(
            extractor.extract("Catch-22", None),
            ("Catch-22".to_string(), None)
        );
        assert_eq!(
            extractor.extract("Catch-22 - Joseph Heller.epub", None),
            ("Catch-22".to_string(), Some("Joseph Heller".to_string()))
        );
    }

    #[test]
    fn test_no_pattern_is_identity() {
        let extractor = TitleAuthorExtractor::new();
        assert_eq!(extractor.extract("MyBook", None), ("MyBook".to_string(), None));
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let extractor = TitleAuthorExtractor::new();
        let (title, _) = extractor.extract("MyBook.pdf", None);
        assert_eq!(extractor.extract(&title, None), (title.clone(), None));
    }

    #[test]
    fn test_cjk_filename_does_not_panic() {
        let extractor = TitleAuthorExtractor::new();
        let (title, author) = extractor.extract("三体", None);
        assert_eq!(title, "三体");
        assert_eq!(author, None);
    }

    struct FixedMetadata(Option<DocProps>);

    struct FixedHandle(Option<DocProps>);

    impl DocumentHandle for FixedHandle {
        fn metadata_props(&mut self) -> Option<DocProps> {
            self.0.take()
        }

        fn render_clip(
            &mut self,
            _pos0: &Position,
            _pos1: &Position,
            _pboxes: &[PageBox],
            _drawer: Option<&str>,
        ) -> Option<Vec<u8>> {
            None
        }
    }

    impl DocumentRenderer for FixedMetadata {
        fn open(&self, _path: &Path) -> Option<Box<dyn DocumentHandle>> {
            Some(Box::new(FixedHandle(self.0.clone())))
        }
    }

    #[test]
    fn test_metadata_wins_over_filename() {
        let renderer = Arc::new(FixedMetadata(Some(DocProps {
            title: Some("Real Title".to_string()),
            author: None,
            authors: Some("Real Author".to_string()),
        })));
        let extractor = TitleAuthorExtractor::with_renderer(renderer);

        assert_eq!(
            extractor.extract("Fallback(Nobody).pdf", Some(Path::new("/books/x.pdf"))),
            ("Real Title".to_string(), Some("Real Author".to_string()))
        );
    }

    #[test]
    fn test_empty_metadata_title_falls_back() {
        let renderer = Arc::new(FixedMetadata(Some(DocProps {
            title: Some("  ".to_string()),
            author: Some("Someone".to_string()),
            authors: None,
        })));
        let extractor = TitleAuthorExtractor::with_renderer(renderer);

        assert_eq!(
            extractor.extract("Fallback.pdf", Some(Path::new("/books/x.pdf"))),
            ("Fallback".to_string(), None)
        );
    }
}
