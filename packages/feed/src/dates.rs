//! Lenient date parsing for the `date` column.
//!
//! The collector writes whatever the upstream RSS feed provided, so the
//! column mixes ISO dates, `YYYY-MM-DD HH:MM:SS` stamps and RFC 2822
//! `pubDate` values. Unparseable input yields `None`; the record is kept.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{FeedError, Result};

/// Date-only layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];

/// Date-time layouts without an offset (taken as UTC).
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a raw date string into a calendar date.
///
/// Timestamps carrying an offset are converted to UTC before the date is
/// taken, so `2024-01-05T23:30:00-05:00` becomes 2024-01-06.
///
/// # Examples
/// ```
/// use ainews_feed::dates::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 1, 5);
/// assert_eq!(parse_date("2024-01-05"), expected);
/// assert_eq!(parse_date("Fri, 05 Jan 2024 10:00:00 GMT"), expected);
/// assert_eq!(parse_date("not a date"), None);
/// ```
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

/// Parse a strict `YYYY-MM-DD` date supplied by a caller (CLI flag, API).
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| FeedError::InvalidDate(text.to_string()))
}

/// Long display form, e.g. `January 5, 2024`.
#[must_use]
pub fn format_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_date("2024-01-05"), ymd(2024, 1, 5));
        assert_eq!(parse_date("  2024-01-05  "), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_collector_timestamp() {
        assert_eq!(parse_date("2024-01-05 14:30:00"), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024-01-05T14:30:00"), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024-01-05 14:30:00.123456"), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        assert_eq!(parse_date("2024-01-05T23:30:00-05:00"), ymd(2024, 1, 6));
        assert_eq!(parse_date("2024-01-05T10:00:00Z"), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_rss_pub_date() {
        assert_eq!(parse_date("Fri, 05 Jan 2024 10:00:00 +0000"), ymd(2024, 1, 5));
        assert_eq!(parse_date("Fri, 05 Jan 2024 10:00:00 GMT"), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_other_layouts() {
        assert_eq!(parse_date("2024/01/05"), ymd(2024, 1, 5));
        assert_eq!(parse_date("01/05/2024"), ymd(2024, 1, 5));
        assert_eq!(parse_date("January 5, 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_date("Jan 5, 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_date("5 January 2024"), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_parse_iso_date_strict() {
        assert_eq!(parse_iso_date("2024-01-05").ok(), ymd(2024, 1, 5));
        assert!(parse_iso_date("Jan 5, 2024").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn test_format_long() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_long(date), "January 5, 2024");
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(format_long(date), "December 25, 2023");
    }
}
