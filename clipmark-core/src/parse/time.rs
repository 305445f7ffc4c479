//! Free-text date/time parsing
//!
//! Readers record annotation timestamps as display strings in whatever
//! locale the device ran under. This parser recognizes the calendar
//! notations that show up in practice (CJK `Y年M月D日`, ISO `YYYY-MM-DD`,
//! and English month abbreviations) plus a literal `H:M:S` clock, and
//! resolves them to epoch seconds in the local timezone.

use chrono::{Duration, Local, NaiveDate, TimeZone};
use regex::Regex;

/// English month abbreviations, scanned in declaration order.
/// Case-sensitive three-letter keys; first match wins.
const MONTHS: &[(&str, u32)] = &[
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("May", 5),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sep", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

/// Markers that flag a 12-hour clock reading as afternoon
const PM_MARKERS: &[&str] = &["PM", "下午"];

/// Parses a free-text date/time string into an epoch timestamp
pub struct TimeParser {
    cjk_date: Regex,
    iso_date: Regex,
    year_fragment: Regex,
    day_fragment: Regex,
    clock: Regex,
}

impl TimeParser {
    pub fn new() -> Self {
        Self {
            cjk_date: Regex::new(r"(\d+)年(\d+)月(\d+)日").expect("valid pattern"),
            iso_date: Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("valid pattern"),
            year_fragment: Regex::new(r"\b(\d{4})\b").expect("valid pattern"),
            day_fragment: Regex::new(r" (\d{1,2}),").expect("valid pattern"),
            clock: Regex::new(r"(\d+):(\d+):(\d+)").expect("valid pattern"),
        }
    }

    /// Parse a possibly-absent timestamp string
    pub fn parse_opt(&self, text: Option<&str>) -> Option<i64> {
        self.parse(text?)
    }

    /// Parse a timestamp string into epoch seconds (local timezone)
    ///
    /// All of year/month/day/hour/minute/second must be present; partial
    /// results are never produced. A `PM`/`下午` marker adds 12 to the hour
    /// with no bounds check; an out-of-range hour rolls into the next day,
    /// matching the calendar normalization the reader itself applied.
    pub fn parse(&self, text: &str) -> Option<i64> {
        if text.is_empty() {
            return None;
        }

        let (year, month, day) = self.parse_date(text)?;
        let caps = self.clock.captures(text)?;
        let mut hour: i64 = caps[1].parse().ok()?;
        let minute: i64 = caps[2].parse().ok()?;
        let second: i64 = caps[3].parse().ok()?;

        if PM_MARKERS.iter().any(|marker| text.contains(marker)) {
            hour += 12;
        }

        let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
        let resolved = midnight
            + Duration::hours(hour)
            + Duration::minutes(minute)
            + Duration::seconds(second);

        Some(Local.from_local_datetime(&resolved).earliest()?.timestamp())
    }

    /// Extract (year, month, day), trying the notations in fixed order
    fn parse_date(&self, text: &str) -> Option<(i32, u32, u32)> {
        for re in [&self.cjk_date, &self.iso_date] {
            if let Some(caps) = re.captures(text) {
                return Some((
                    caps[1].parse().ok()?,
                    caps[2].parse().ok()?,
                    caps[3].parse().ok()?,
                ));
            }
        }

        for (name, month) in MONTHS {
            if text.contains(name) {
                // First matching month keyword wins; the year and day must
                // then be present elsewhere in the text or the whole parse
                // yields nothing.
                let year = self.year_fragment.captures(text)?[1].parse().ok()?;
                let day = self.day_fragment.captures(text)?[1].parse().ok()?;
                return Some((year, *month, day));
            }
        }

        None
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}
