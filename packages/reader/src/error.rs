//! Error types for the reader.
//!
//! Retrieval failures of the article CSV all surface as
//! [`ReaderError::SourceUnavailable`] so callers can tell "could not load"
//! apart from "loaded zero articles". The lower-level variants are produced
//! inside [`crate::http`] and folded into it by [`crate::source`].

use thiserror::Error;

use ainews_feed::FeedError;

/// Main error type for the reader.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The CSV (or timestamp file) could not be retrieved.
    #[error("News source unavailable at {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transient failures persisted through every retry.
    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// Response body larger than the configured limit.
    #[error("Response too large: {size} bytes (maximum {max})")]
    ResponseTooLarge { size: u64, max: u64 },

    /// A source string that is neither a URL nor a usable path.
    #[error("Invalid source: '{0}'")]
    InvalidSource(String),

    /// Invalid configuration value (flag or environment variable).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the feed core (filters, dates, timestamp file).
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderError {
    /// Wrap any retrieval error as `SourceUnavailable` for `location`.
    #[must_use]
    pub fn unavailable(location: impl Into<String>, cause: &dyn std::fmt::Display) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            reason: cause.to_string(),
        }
    }
}

/// Result type alias for reader operations.
pub type Result<T> = std::result::Result<T, ReaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_display() {
        let err = ReaderError::unavailable("data/ai_news.csv", &"No such file or directory");
        assert_eq!(
            err.to_string(),
            "News source unavailable at data/ai_news.csv: No such file or directory"
        );
    }

    #[test]
    fn test_feed_error_is_transparent() {
        let err = ReaderError::from(FeedError::InvalidDate("x".to_string()));
        assert_eq!(
            err.to_string(),
            "Invalid date: 'x'. Expected YYYY-MM-DD (e.g., 2024-01-05)"
        );
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = ReaderError::RetriesExhausted {
            attempts: 3,
            message: "Server error: 503".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed after 3 attempts: Server error: 503"
        );
    }
}
