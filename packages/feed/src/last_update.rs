//! Companion `last_update.json` written next to the CSV by the collector:
//!
//! ```json
//! {"timestamp": "2024-01-05 14:30:00"}
//! ```
//!
//! Timestamps without an offset are UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FeedError, Result};

#[derive(Debug, Deserialize)]
struct RawLastUpdate {
    timestamp: String,
}

/// When the CSV was last refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastUpdate {
    pub timestamp: DateTime<Utc>,
}

impl LastUpdate {
    /// Parse the JSON body of the timestamp file.
    ///
    /// # Examples
    /// ```
    /// use ainews_feed::LastUpdate;
    ///
    /// let update = LastUpdate::from_json(r#"{"timestamp": "2024-01-05 14:30:00"}"#).unwrap();
    /// assert_eq!(update.timestamp.to_rfc3339(), "2024-01-05T14:30:00+00:00");
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawLastUpdate = serde_json::from_str(text)?;
        let timestamp = parse_timestamp(&raw.timestamp)
            .ok_or_else(|| FeedError::InvalidTimestamp(raw.timestamp.clone()))?;
        Ok(Self { timestamp })
    }

    /// Display form, e.g. `January 5, 2024 at 02:30 PM UTC`.
    #[must_use]
    pub fn display(&self) -> String {
        self.timestamp.format("%B %-d, %Y at %I:%M %p UTC").to_string()
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_format() {
        let update = LastUpdate::from_json(r#"{"timestamp": "2024-01-05 14:30:00"}"#).unwrap();
        assert_eq!(update.display(), "January 5, 2024 at 02:30 PM UTC");
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let update =
            LastUpdate::from_json(r#"{"timestamp": "2024-01-05T09:30:00-05:00"}"#).unwrap();
        assert_eq!(update.timestamp.to_rfc3339(), "2024-01-05T14:30:00+00:00");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let json = r#"{"timestamp": "2024-01-05 14:30:00", "articles": 42}"#;
        assert!(LastUpdate::from_json(json).is_ok());
    }

    #[test]
    fn test_invalid_json() {
        let err = LastUpdate::from_json("not json").unwrap_err();
        assert!(matches!(err, FeedError::LastUpdateJson(_)));

        let err = LastUpdate::from_json(r#"{"time": "x"}"#).unwrap_err();
        assert!(matches!(err, FeedError::LastUpdateJson(_)));
    }

    #[test]
    fn test_invalid_timestamp() {
        let err = LastUpdate::from_json(r#"{"timestamp": "yesterday"}"#).unwrap_err();
        assert!(matches!(err, FeedError::InvalidTimestamp(ref t) if t == "yesterday"));
    }
}
