//! Parsing flat "My Clippings"-style annotation exports
//!
//! Some readers export all annotations into one flat text file of
//! five-line blocks:
//!
//! ```text
//! MyBook (Jane Doe)
//! - Highlight[12] | Added on 2020-05-01 12:30:45
//!
//! the highlighted text
//! ==========
//! ```
//!
//! Blocks accumulate into the same `title → Book` mapping the aggregator
//! produces.

use crate::parse::{EntryClassifier, TitleAuthorExtractor};
use crate::types::{Book, Entry};
use crate::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const SEPARATOR: &str = "==========";

/// Parses a flat clippings export into per-book annotation records
pub struct FlatClippingsParser {
    extractor: TitleAuthorExtractor,
    classifier: EntryClassifier,
}

/// Accumulates one five-line block
#[derive(Default)]
struct Block {
    title: String,
    author: Option<String>,
    info: Option<crate::parse::ClassifiedInfo>,
    text: String,
}

impl FlatClippingsParser {
    pub fn new() -> Self {
        Self {
            extractor: TitleAuthorExtractor::new(),
            classifier: EntryClassifier::new(),
        }
    }

    /// Parse a clippings file from disk
    pub fn parse_file(&self, path: &Path) -> Result<BTreeMap<String, Book>> {
        let contents = fs::read_to_string(path)?;
        Ok(self.parse_str(&contents))
    }

    /// Parse clippings text
    ///
    /// A block is materialized only when its info line classified into a
    /// category and its text is non-empty; anything else is dropped without
    /// error.
    pub fn parse_str(&self, contents: &str) -> BTreeMap<String, Book> {
        let mut books: BTreeMap<String, Book> = BTreeMap::new();
        let mut block = Block::default();
        let mut index = 1;

        for raw_line in contents.lines() {
            let line = raw_line.trim_start_matches('\u{feff}');

            if line.starts_with(SEPARATOR) {
                self.flush(&mut books, std::mem::take(&mut block));
                index = 1;
                continue;
            }

            match index {
                1 => {
                    let (title, author) = self.extractor.extract(line, None);
                    block.title = title;
                    block.author = author;
                }
                2 => block.info = Some(self.classifier.classify(line)),
                4 => block.text = line.trim().to_string(),
                _ => {}
            }
            index += 1;
        }
        self.flush(&mut books, block);

        for book in books.values_mut() {
            book.sort_entries();
        }
        books
    }

    fn flush(&self, books: &mut BTreeMap<String, Book>, block: Block) {
        let Some(info) = block.info else { return };
        let Some(category) = info.category else { return };
        if block.text.is_empty() || block.title.is_empty() {
            return;
        }

        let page = info
            .location
            .as_deref()
            .map(leading_digits)
            .unwrap_or(0)
            .max(1);

        let entry = Entry {
            page,
            category,
            time: info.time,
            text: block.text,
            chapter: None,
            note: None,
            image: None,
        };

        books
            .entry(block.title.clone())
            .or_insert_with(|| Book::new(PathBuf::new(), block.title, block.author))
            .add_entry(entry);
    }
}

impl Default for FlatClippingsParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Leading digit run of a location token ("12-15" → 12)
fn leading_digits(location: &str) -> u32 {
    let digits: String = location.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryCategory;

    const SAMPLE: &str = "\
MyBook (Jane Doe)
- Highlight[12-15] | Added on 2020-05-01 12:30:45

the highlighted passage
==========
MyBook (Jane Doe)
- Note[3] | Added on 2020-05-02 09:00:00

a thought about page three
==========
Other Title
- Bookmark | Added on 2020-05-03 10:00:00

marked spot
==========
";

    #[test]
    fn test_blocks_grouped_by_title() {
        let parser = FlatClippingsParser::new();
        let books = parser.parse_str(SAMPLE);

        assert_eq!(books.len(), 2);
        let mybook = &books["MyBook"];
        assert_eq!(mybook.author.as_deref(), Some("Jane Doe"));
        assert_eq!(mybook.entries.len(), 2);
        // Sorted by page: the note on page 3 precedes the highlight on 12
        assert_eq!(mybook.entries[0].page, 3);
        assert_eq!(mybook.entries[0].category, EntryCategory::Note);
        assert_eq!(mybook.entries[1].page, 12);
        assert_eq!(mybook.entries[1].text, "the highlighted passage");
        assert!(mybook.entries[1].time.is_some());
    }

    #[test]
    fn test_block_without_location_defaults_to_page_one() {
        let parser = FlatClippingsParser::new();
        let books = parser.parse_str(SAMPLE);
        assert_eq!(books["Other Title"].entries[0].page, 1);
    }

    #[test]
    fn test_incomplete_blocks_are_dropped() {
        let parser = FlatClippingsParser::new();

        // No text line
        let books = parser.parse_str(
            "MyBook\n- Highlight[1] | Added on 2020-05-01 12:30:45\n\n\n==========\n",
        );
        assert!(books.is_empty());

        // Info line that classifies into nothing
        let books =
            parser.parse_str("MyBook\nsomething else entirely\n\nsome text\n==========\n");
        assert!(books.is_empty());
    }

    #[test]
    fn test_bom_is_stripped() {
        let parser = FlatClippingsParser::new();
        let sample = "\u{feff}MyBook\n- Highlight[2] | Added on 2020-05-01 12:30:45\n\ntext\n==========\n";
        let books = parser.parse_str(sample);
        assert_eq!(books["MyBook"].entries.len(), 1);
    }
}
