//! Text cleanup applied to parsed fields.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Numeric (`&#8217;`, `&#x2019;`) and the common named HTML entities.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|amp|lt|gt|quot|apos|nbsp);")
        .expect("valid regex")
});

/// Decode HTML entities left behind by RSS feeds.
///
/// Entities that do not map to a valid character are kept verbatim.
///
/// # Examples
/// ```
/// use ainews_feed::text::decode_entities;
///
/// assert_eq!(decode_entities("It&#8217;s &amp; more"), "It\u{2019}s & more");
/// assert_eq!(decode_entities("plain"), "plain");
/// ```
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY_PATTERN.replace_all(text, |caps: &Captures<'_>| {
        let whole = &caps[0];
        decode_entity(&caps[1]).map_or_else(|| whole.to_string(), String::from)
    })
}

fn decode_entity(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Case-insensitive substring test used by search.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_numeric() {
        assert_eq!(decode_entities("&#39;quoted&#39;"), "'quoted'");
        assert_eq!(decode_entities("&#x2019;"), "\u{2019}");
        assert_eq!(decode_entities("&#X41;"), "A");
    }

    #[test]
    fn test_decode_named() {
        assert_eq!(decode_entities("a &lt;b&gt; &quot;c&quot;"), "a <b> \"c\"");
        assert_eq!(decode_entities("x&nbsp;y"), "x\u{a0}y");
    }

    #[test]
    fn test_invalid_code_point_kept() {
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#1114112;"), "&#1114112;");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(decode_entities("&copy; 2024"), "&copy; 2024");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }

    #[test]
    fn test_borrowed_without_ampersand() {
        assert!(matches!(decode_entities("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("OpenAI Releases GPT", "gpt"));
        assert!(!contains_ignore_case("OpenAI", "google"));
    }
}
