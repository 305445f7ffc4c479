//! Driving aggregation across history sources

use crate::merge::HighlightBookmarkMerger;
use crate::parse::TitleAuthorExtractor;
use crate::render::DocumentRenderer;
use crate::sidecar::SidecarStore;
use crate::source::{HistoryEntry, HistorySource};
use crate::types::Book;
use crate::Result;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Aggregation configuration
///
/// Injected into [`ClippingAggregator`] at construction; there is no
/// process-wide state.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Filename suffixes recognized as sidecar payloads
    pub sidecar_suffixes: Vec<String>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sidecar_suffixes: vec![".json".to_string()],
        }
    }
}

impl AggregatorConfig {
    fn recognizes(&self, sidecar: &Path) -> bool {
        let Some(name) = sidecar.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.sidecar_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }
}

/// Iterates history sources and populates the per-book collection
///
/// Every failure is isolated to its source: missing files are skipped
/// silently, structural sidecar failures are logged and skipped, and the
/// aggregator always returns whatever subset it could parse.
pub struct ClippingAggregator<S: SidecarStore> {
    config: AggregatorConfig,
    store: S,
    extractor: TitleAuthorExtractor,
    merger: HighlightBookmarkMerger,
}

impl<S: SidecarStore> ClippingAggregator<S> {
    pub fn new(config: AggregatorConfig, store: S) -> Self {
        Self {
            config,
            store,
            extractor: TitleAuthorExtractor::new(),
            merger: HighlightBookmarkMerger::new(),
        }
    }

    /// Enable document metadata lookup and image clips
    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.extractor = TitleAuthorExtractor::with_renderer(Arc::clone(&renderer));
        self.merger = HighlightBookmarkMerger::with_renderer(renderer);
        self
    }

    /// Aggregate every entry a history source enumerates
    pub fn aggregate_source(&self, source: &dyn HistorySource) -> Result<BTreeMap<String, Book>> {
        Ok(self.aggregate(source.entries()?))
    }

    /// Aggregate the given history entries into a `title → Book` mapping
    ///
    /// A duplicate title overwrites the earlier book under the same key;
    /// the last source wins.
    pub fn aggregate(
        &self,
        sources: impl IntoIterator<Item = HistoryEntry>,
    ) -> BTreeMap<String, Book> {
        let mut books = BTreeMap::new();

        for entry in sources {
            if !entry.file.is_file() || !entry.sidecar.is_file() {
                continue;
            }
            if !self.config.recognizes(&entry.sidecar) {
                continue;
            }

            let data = match self.store.load(&entry.sidecar) {
                Ok(data) => data,
                Err(e) => {
                    warn!(sidecar = %entry.sidecar.display(), error = %e, "skipping unreadable sidecar");
                    continue;
                }
            };
            if data.highlight.is_empty() {
                debug!(file = %entry.file.display(), "no highlights, skipping");
                continue;
            }

            let fallback = entry
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let (title, author) = self.extractor.extract(&fallback, Some(&entry.file));

            let mut book = Book::new(entry.file.clone(), title.clone(), author);
            self.merger.merge(&data.highlight, &data.bookmarks, &mut book);

            debug!(title = %title, entries = book.entries.len(), "aggregated book");
            books.insert(title, book);
        }

        books
    }
}
