//! The article record produced by the parser.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CATEGORY;
use crate::dates::{format_long, parse_date};

/// One normalized row of news-item data.
///
/// Records are built once per load and never mutated afterwards; a reload
/// replaces the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Headline. Never empty: rows without a title are discarded.
    pub title: String,

    /// Body text from the `description` column (or `summary` when the
    /// file uses that name instead).
    pub description: String,

    /// Link to the full article.
    pub url: String,

    /// Publisher name.
    pub source: String,

    /// Trimmed category, `"uncategorized"` when blank.
    pub category: String,

    /// Date column text after field cleanup.
    pub raw_date: String,

    /// Parsed calendar date; `None` when `raw_date` is not a recognised date.
    pub date: Option<NaiveDate>,

    /// Columns without a dedicated field, keyed by header name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl ArticleRecord {
    /// Create a record from already-cleaned values.
    ///
    /// Category and date go through the same normalization the parser
    /// applies.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        raw_date: impl Into<String>,
        source: impl Into<String>,
        category: &str,
    ) -> Self {
        let raw_date = raw_date.into();
        Self {
            title: title.into(),
            description: String::new(),
            url: String::new(),
            source: source.into(),
            category: normalize_category(category),
            date: parse_date(&raw_date),
            raw_date,
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Display date (`January 5, 2024`), falling back to the raw text.
    #[must_use]
    pub fn display_date(&self) -> String {
        match self.date {
            Some(date) => format_long(date),
            None => self.raw_date.clone(),
        }
    }

    /// Value of a column that has no dedicated field.
    #[must_use]
    pub fn extra(&self, column: &str) -> Option<&str> {
        self.extra.get(column).map(String::as_str)
    }
}

/// Trim a category and substitute the default when nothing is left.
///
/// # Examples
/// ```
/// use ainews_feed::article::normalize_category;
///
/// assert_eq!(normalize_category("  research "), "research");
/// assert_eq!(normalize_category("   "), "uncategorized");
/// ```
#[must_use]
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}
