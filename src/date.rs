//! The `date` field of a note.
//!
//! Front-matter dates are kept verbatim for display and parsed once for
//! ordering, so a listing sorts chronologically even when authors mix
//! `2024-06-01` with `2024-06-01T09:30:00Z`.

use std::{cmp::Ordering, fmt, time::SystemTime};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"];

/// Same shape as a JavaScript `toISOString()`.
const FALLBACK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
/// Sorts the same as the instant for four-digit years.
const SORT_KEY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";

/// Ordering: dates compare by a sort key, the canonical form of the parsed
/// instant or the trimmed raw text when parsing fails, then by the raw text.
/// Unparsed text that does not start with a digit ranks below everything
/// else. Fixed-width `YYYY-MM-DD` values therefore keep plain string order,
/// whether or not they name a real day.
#[derive(Debug, Clone)]
pub struct NoteDate {
    raw: String,
    parsed: Option<NaiveDateTime>,
    sort_key: String,
}

impl NoteDate {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse(raw.trim());
        let sort_key = match parsed {
            Some(dt) => dt.format(SORT_KEY_FORMAT).to_string(),
            None => raw.trim().to_string(),
        };
        Self {
            raw,
            parsed,
            sort_key,
        }
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        let time: DateTime<Utc> = time.into();
        Self {
            raw: time.format(FALLBACK_FORMAT).to_string(),
            parsed: Some(time.naive_utc()),
            sort_key: time.naive_utc().format(SORT_KEY_FORMAT).to_string(),
        }
    }

    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// `None` when the text matched none of the known formats.
    pub fn parsed(&self) -> Option<NaiveDateTime> {
        self.parsed
    }

    fn is_date_like(&self) -> bool {
        self.parsed.is_some() || self.sort_key.starts_with(|c: char| c.is_ascii_digit())
    }
}

fn parse(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

impl Ord for NoteDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.is_date_like()
            .cmp(&other.is_date_like())
            .then_with(|| self.sort_key.cmp(&other.sort_key))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for NoteDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NoteDate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NoteDate {}

impl fmt::Display for NoteDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for NoteDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn parses_known_formats() {
        for raw in [
            "2024-06-01",
            "2024-06-01T00:00:00",
            "2024-06-01T00:00:00.000Z",
            "2024-06-01 00:00:00",
            "June 1, 2024",
            "Jun 01, 2024",
        ] {
            let date = NoteDate::new(raw);
            assert_eq!(
                date.parsed(),
                NaiveDate::from_ymd_opt(2024, 6, 1).and_then(|d| d.and_hms_opt(0, 0, 0)),
                "{raw}"
            );
        }
        assert!(NoteDate::new("someday").parsed().is_none());
    }

    #[test]
    fn orders_across_formats() {
        let earlier = NoteDate::new("July 10, 2025");
        let later = NoteDate::new("2025-07-11");
        assert!(earlier < later);
        assert!(NoteDate::new("2024-01-01T10:00:00Z") > NoteDate::new("2024-01-01"));
    }

    #[test]
    fn unparsed_dates_order_below_parsed_ones() {
        let parsed = NoteDate::new("1999-01-01");
        let unparsed = NoteDate::new("zzz");
        assert!(unparsed < parsed);
        assert!(NoteDate::new("abc") < NoteDate::new("abd"));
    }

    #[test]
    fn impossible_calendar_days_keep_string_position() {
        let march = NoteDate::new("2024-03-01");
        let feb_30 = NoteDate::new("2024-02-30");
        let january = NoteDate::new("2024-01-01");
        assert!(feb_30.parsed().is_none());
        assert!(january < feb_30 && feb_30 < march);

        let mut dates = vec![january, march, feb_30];
        dates.sort_by(|a, b| b.cmp(a));
        let raw: Vec<_> = dates.iter().map(NoteDate::as_str).collect();
        assert_eq!(raw, ["2024-03-01", "2024-02-30", "2024-01-01"]);
    }

    #[test]
    fn equal_instants_with_different_text_are_not_equal() {
        let a = NoteDate::new("2024-06-01");
        let b = NoteDate::new("2024-06-01T00:00:00");
        assert_ne!(a, b);
        assert_eq!(a, NoteDate::new("2024-06-01"));
    }

    #[test]
    fn fallback_matches_iso_string_shape() {
        let date = NoteDate::from_system_time(UNIX_EPOCH + Duration::from_millis(1_717_200_000_123));
        assert_eq!(date.as_str(), "2024-06-01T00:00:00.123Z");
        assert_eq!(date, NoteDate::new("2024-06-01T00:00:00.123Z"));
    }

    #[test]
    fn serializes_as_raw_text() {
        let json = serde_json::to_string(&NoteDate::new(" 2024-06-01")).unwrap();
        assert_eq!(json, "\" 2024-06-01\"");
    }
}
