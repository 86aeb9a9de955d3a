//! HTTP client wrapper for downloading the published feed files.

use std::io::Read;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{ReaderError, Result};

/// User agent string identifying this reader.
const USER_AGENT: &str = concat!("ainews-reader/", env!("CARGO_PKG_VERSION"));

/// Maximum number of attempts for transient failures.
pub const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// UTF-8 byte order mark, which spreadsheet exports like to prepend.
const UTF8_BOM: &str = "\u{feff}";

/// Create a configured HTTP client.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download `url`, retrying transient failures with exponential backoff.
///
/// Server errors (5xx), connection failures and timeouts are retried up to
/// [`MAX_RETRIES`] attempts. Client errors (4xx) fail immediately. Bodies
/// larger than `max_size` bytes are rejected; at most `max_size + 1` bytes
/// are read, even without a `Content-Length`.
pub fn download_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // 500ms, 1000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                let response = response.error_for_status()?;
                if let Some(size) = response.content_length() {
                    if size > max_size {
                        return Err(ReaderError::ResponseTooLarge {
                            size,
                            max: max_size,
                        });
                    }
                }

                let bytes = read_limited(response, max_size)?;
                tracing::debug!(url, size = bytes.len(), "Downloaded");
                return Ok(bytes);
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                return Err(ReaderError::Http(e));
            }
        }
    }

    Err(ReaderError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Read `reader` to the end, failing once more than `max_size` bytes arrive.
///
/// On failure `size` is the number of bytes read before stopping.
pub fn read_limited<R: Read>(reader: R, max_size: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(max_size.saturating_add(1))
        .read_to_end(&mut bytes)?;

    let size = bytes.len() as u64;
    if size > max_size {
        return Err(ReaderError::ResponseTooLarge {
            size,
            max: max_size,
        });
    }
    Ok(bytes)
}

/// Decode downloaded bytes as UTF-8 text.
///
/// Invalid sequences are replaced rather than rejected, with a warning
/// naming `context`. A leading byte order mark is dropped.
#[must_use]
pub fn bytes_to_string(bytes: &[u8], context: &str) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::warn!(
                context,
                valid_up_to = e.valid_up_to(),
                "Invalid UTF-8, replacing bad sequences"
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_read_limited_within_limit() {
        let bytes = read_limited(std::io::Cursor::new(b"title\nHello\n"), 12).unwrap();
        assert_eq!(bytes, b"title\nHello\n");
    }

    #[test]
    fn test_read_limited_stops_after_limit() {
        let body = std::io::Cursor::new(vec![b'x'; 10_000]);
        let err = read_limited(body, 16).unwrap_err();
        match err {
            ReaderError::ResponseTooLarge { size, max } => {
                assert_eq!(size, 17);
                assert_eq!(max, 16);
            }
            other => panic!("expected ResponseTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_bytes_to_string_valid() {
        assert_eq!(bytes_to_string(b"title\nHello\n", "test"), "title\nHello\n");
    }

    #[test]
    fn test_bytes_to_string_strips_bom() {
        let bytes = b"\xef\xbb\xbftitle,date\n";
        assert_eq!(bytes_to_string(bytes, "test"), "title,date\n");
    }

    #[test]
    fn test_bytes_to_string_lossy() {
        let bytes = b"caf\xe9 news";
        let text = bytes_to_string(bytes, "test");
        assert!(text.starts_with("caf"));
        assert!(text.ends_with(" news"));
        assert!(text.contains('\u{fffd}'));
    }
}
