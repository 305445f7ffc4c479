//! Document rendering seam and the image-clip adapter
//!
//! Rendering engines live outside this crate. The engine only needs two
//! things from a document: its metadata properties and a pixel snapshot of
//! a highlighted region, so that is the whole trait surface. Handle close
//! is `Drop`; every acquisition in this crate is scoped to a single call.

use crate::types::{Image, PageBox, Position};
use std::path::Path;
use std::sync::Arc;

/// Metadata properties of an opened document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocProps {
    pub title: Option<String>,
    pub author: Option<String>,
    pub authors: Option<String>,
}

/// An open document handle
///
/// A `None` from [`metadata_props`](DocumentHandle::metadata_props) means the
/// metadata load failed; callers must not make further calls on the handle.
pub trait DocumentHandle {
    fn metadata_props(&mut self) -> Option<DocProps>;

    /// Render a snapshot bounded by `pos0`/`pos1`, with optional per-page
    /// bounding boxes and drawing mode
    fn render_clip(
        &mut self,
        pos0: &Position,
        pos1: &Position,
        pboxes: &[PageBox],
        drawer: Option<&str>,
    ) -> Option<Vec<u8>>;
}

/// Opens documents for metadata lookup and clip rendering
pub trait DocumentRenderer: Send + Sync {
    fn open(&self, path: &Path) -> Option<Box<dyn DocumentHandle>>;
}

/// Thin adapter over [`DocumentRenderer`] for position-only highlights
///
/// Opens and closes exactly one document handle per call; the handle never
/// outlives the call.
pub struct ImageClipRequester {
    renderer: Arc<dyn DocumentRenderer>,
}

impl ImageClipRequester {
    pub fn new(renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { renderer }
    }

    /// Render the region between `pos0` and `pos1` and hash the payload
    ///
    /// Returns `None` when the document cannot be opened or snapshot
    /// generation yields no payload.
    pub fn request_clip(
        &self,
        file: &Path,
        pos0: &Position,
        pos1: &Position,
        pboxes: &[PageBox],
        drawer: Option<&str>,
    ) -> Option<Image> {
        let mut handle = self.renderer.open(file)?;
        let data = handle.render_clip(pos0, pos1, pboxes, drawer)?;
        if data.is_empty() {
            return None;
        }
        Some(Image::new(data))
    }
}
