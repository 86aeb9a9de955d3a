//! Feed locations and retrieval.
//!
//! A [`Source`] is either an `http(s)` URL or a local path. [`Fetcher`]
//! reads either kind into text; any failure on the way (missing file,
//! refused connection, 4xx/5xx, oversized body) becomes
//! [`ReaderError::SourceUnavailable`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reqwest::blocking::Client;
use url::Url;

use crate::config::DEFAULT_MAX_RESPONSE_SIZE;
use crate::error::{ReaderError, Result};
use crate::http::{bytes_to_string, create_client, download_bytes};

/// Where a feed file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Remote file served over HTTP(S).
    Url(Url),
    /// File on the local filesystem.
    File(PathBuf),
}

impl Source {
    /// Interpret `raw` as a URL when it has an `http`/`https` scheme, and as
    /// a path otherwise.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ReaderError::InvalidSource(raw.to_string()));
        }

        let lower = raw.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url =
                Url::parse(raw).map_err(|e| ReaderError::InvalidSource(format!("{raw} ({e})")))?;
            return Ok(Self::Url(url));
        }

        Ok(Self::File(PathBuf::from(raw)))
    }

    /// The file called `file_name` in the same directory as this source.
    ///
    /// Returns `None` when no sibling can be formed, e.g. for a URL that
    /// cannot be a base.
    #[must_use]
    pub fn sibling(&self, file_name: &str) -> Option<Self> {
        match self {
            Self::Url(url) => url.join(file_name).ok().map(Self::Url),
            Self::File(path) => {
                let dir = path.parent().unwrap_or_else(|| Path::new(""));
                Some(Self::File(dir.join(file_name)))
            }
        }
    }

    /// True for remote sources.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl FromStr for Source {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads sources into text.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_size: u64,
}

impl Fetcher {
    /// Create a fetcher with the default size limit.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            max_size: DEFAULT_MAX_RESPONSE_SIZE,
        })
    }

    #[must_use]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Retrieve the full text behind `source`.
    ///
    /// Every retrieval failure is reported as
    /// [`ReaderError::SourceUnavailable`] naming the source.
    pub fn fetch_text(&self, source: &Source) -> Result<String> {
        let location = source.to_string();
        let result = match source {
            Source::Url(url) => download_bytes(&self.client, url.as_str(), self.max_size),
            Source::File(path) => self.read_file(path),
        };

        match result {
            Ok(bytes) => {
                tracing::debug!(source = %location, bytes = bytes.len(), "Fetched source");
                Ok(bytes_to_string(&bytes, &location))
            }
            Err(e) => {
                tracing::debug!(source = %location, error = %e, "Source unavailable");
                Err(ReaderError::unavailable(location, &e))
            }
        }
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let size = fs::metadata(path)?.len();
        if size > self.max_size {
            return Err(ReaderError::ResponseTooLarge {
                size,
                max: self.max_size,
            });
        }
        Ok(fs::read(path)?)
    }
}
