//! Classification of raw annotation lines

use super::TimeParser;
use crate::types::EntryCategory;
use regex::Regex;

/// Locale-keyed category keywords, scanned in declaration order.
/// First matching category wins.
const CATEGORY_KEYWORDS: &[(EntryCategory, &[&str])] = &[
    (EntryCategory::Highlight, &["Highlight", "标注"]),
    (EntryCategory::Note, &["Note", "笔记"]),
    (EntryCategory::Bookmark, &["Bookmark", "书签"]),
];

/// Transient result of classifying one annotation line.
/// Consumed immediately by the caller, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedInfo {
    pub category: Option<EntryCategory>,
    pub location: Option<String>,
    pub time: Option<i64>,
}

/// Splits a raw annotation line into {category, location, time}
pub struct EntryClassifier {
    pipe: Regex,
    location: Regex,
    time: TimeParser,
}

impl EntryClassifier {
    pub fn new() -> Self {
        Self {
            // Whitespace-trimmed segments around the first pipe
            pipe: Regex::new(r"^(.*?)\s*\|\s*(.*)$").expect("valid pattern"),
            location: Regex::new(r"\d+-?\d*").expect("valid pattern"),
            time: TimeParser::new(),
        }
    }

    /// Classify one annotation line
    pub fn classify(&self, line: &str) -> ClassifiedInfo {
        let (part1, part2) = match self.pipe.captures(line) {
            Some(caps) => (
                Some(caps[1].trim().to_string()),
                caps[2].trim().to_string(),
            ),
            None => (None, String::new()),
        };

        let mut category = None;
        let mut location = None;
        if let Some(part1) = &part1 {
            'scan: for (cat, words) in CATEGORY_KEYWORDS {
                for word in *words {
                    if part1.contains(word) {
                        category = Some(*cat);
                        break 'scan;
                    }
                }
            }
            if category.is_some() {
                location = self
                    .location
                    .find(part1)
                    .map(|m| m.as_str().to_string());
            }
        }

        ClassifiedInfo {
            category,
            location,
            time: self.time.parse(&part2),
        }
    }
}

impl Default for EntryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
