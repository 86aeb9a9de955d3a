//! Error types for the feed core.
//!
//! Parsing the CSV itself never fails: malformed rows degrade to partially
//! empty records. The variants here cover the consumer-side operations
//! (date windows, option parsing, the companion timestamp file).

use thiserror::Error;

/// Main error type for feed operations.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A date supplied by the caller could not be parsed.
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD (e.g., 2024-01-05)")]
    InvalidDate(String),

    /// A date window whose start lies after its end.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    },

    /// Page size of zero or above the configured maximum.
    #[error("Invalid page size: {0} (expected 1..={max})", max = crate::config::MAX_PAGE_SIZE)]
    InvalidPageSize(usize),

    /// The companion timestamp file is not valid JSON.
    #[error("Invalid last-update file: {0}")]
    LastUpdateJson(#[from] serde_json::Error),

    /// The companion timestamp file has an unparseable timestamp.
    #[error("Invalid last-update timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// Input exceeds the maximum accepted size.
    #[error("Input too large: {size} bytes (maximum {max})")]
    InputTooLarge { size: usize, max: usize },
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
