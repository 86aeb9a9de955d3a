//! Configuration constants and runtime settings for the reader.

use ainews_feed::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use ainews_feed::ParseOptions;

use crate::error::{ReaderError, Result};
use crate::source::Source;

/// Where the published site keeps the CSV, relative to its root.
pub const DEFAULT_SOURCE: &str = "data/ai_news.csv";

/// File name of the companion timestamp, next to the CSV.
pub const TIMESTAMP_FILE_NAME: &str = "last_update.json";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum response size in bytes (50 MB).
///
/// The daily CSV is a few hundred kilobytes; anything near this limit is
/// not a news file.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 50 * 1024 * 1024;

/// Environment variable overriding the CSV location.
pub const ENV_SOURCE: &str = "AINEWS_SOURCE";

/// Environment variable overriding the timestamp location.
pub const ENV_TIMESTAMP: &str = "AINEWS_TIMESTAMP";

/// Environment variable overriding the page size.
pub const ENV_PAGE_SIZE: &str = "AINEWS_PAGE_SIZE";

/// Settings for one load of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// CSV location.
    pub source: Source,

    /// Timestamp location; `None` skips it.
    pub timestamp: Option<Source>,

    /// Articles per page.
    pub page_size: usize,

    /// Largest accepted response or file, in bytes.
    pub max_response_size: u64,

    /// CSV dialect settings.
    pub parse_options: ParseOptions,
}

impl ReaderConfig {
    /// Config for `source`, with the timestamp file expected next to it.
    #[must_use]
    pub fn new(source: Source) -> Self {
        let timestamp = source.sibling(TIMESTAMP_FILE_NAME);
        Self {
            source,
            timestamp,
            page_size: DEFAULT_PAGE_SIZE,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            parse_options: ParseOptions::default(),
        }
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = lookup(ENV_SOURCE).unwrap_or_else(|| DEFAULT_SOURCE.to_string());
        let mut config = Self::new(source.parse()?);

        if let Some(timestamp) = lookup(ENV_TIMESTAMP) {
            config = config.with_timestamp(Some(timestamp.parse()?));
        }

        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            let page_size = raw.trim().parse::<usize>().map_err(|_| {
                ReaderError::Config(format!("{ENV_PAGE_SIZE} must be a number, got '{raw}'"))
            })?;
            config = config.with_page_size(page_size)?;
        }

        Ok(config)
    }

    /// Point at another CSV. A timestamp still derived from the old
    /// location follows the CSV; an explicit one is kept.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        if self.timestamp == self.source.sibling(TIMESTAMP_FILE_NAME) {
            self.timestamp = source.sibling(TIMESTAMP_FILE_NAME);
        }
        self.source = source;
        self
    }

    /// Override (or with `None`, disable) the timestamp location.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Option<Source>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Result<Self> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ReaderError::Config(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        self.page_size = page_size;
        Ok(self)
    }

    #[must_use]
    pub fn with_max_response_size(mut self, max_response_size: u64) -> Self {
        self.max_response_size = max_response_size;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.parse_options = self.parse_options.with_delimiter(delimiter);
        self
    }

    /// Decode HTML entities in titles and descriptions.
    #[must_use]
    pub fn with_decode_entities(mut self, decode: bool) -> Self {
        self.parse_options = self.parse_options.with_decode_entities(decode);
        self
    }

    /// True when the dialect differs from the collector's default.
    #[must_use]
    pub fn has_custom_dialect(&self) -> bool {
        self.parse_options != ParseOptions::default()
    }
}
