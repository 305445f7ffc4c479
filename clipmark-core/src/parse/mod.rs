//! Heuristic parsers for loosely structured reader output

mod classify;
mod time;
mod title;

pub use classify::{ClassifiedInfo, EntryClassifier};
pub use time::TimeParser;
pub use title::TitleAuthorExtractor;
