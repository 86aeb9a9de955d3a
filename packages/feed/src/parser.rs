//! CSV article parser.
//!
//! Converts the raw text of the news CSV into an ordered list of
//! [`ArticleRecord`]s. The dialect is the one the collector and the web page
//! agree on, which is close to RFC 4180 but not identical:
//!
//! - Lines are separated by `\n`; a trailing `\r` is dropped.
//! - Blank lines are skipped anywhere in the file.
//! - The first non-blank line is the header; column mapping is positional.
//! - A `"` toggles the quoted state unless the previous character is `\`.
//!   Escaped quotes are kept literally and the backslash stays in the field.
//! - Every field then loses one leading and one trailing `"` and is trimmed.
//! - Rows shorter than the header get empty trailing fields; extra values
//!   are ignored.
//! - Rows whose title ends up empty are dropped.
//!
//! Field text is otherwise left as written. HTML entity decoding is an
//! opt-in step ([`ParseOptions::with_decode_entities`]) that runs after the
//! title check.
//!
//! Parsing never fails. Malformed rows degrade to partially empty records.

use std::collections::BTreeMap;

use crate::article::{normalize_category, ArticleRecord};
use crate::config::{columns, DEFAULT_DELIMITER};
use crate::dates::parse_date;
use crate::text::decode_entities;

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Field delimiter.
    pub delimiter: char,

    /// Decode HTML entities in `title` and `description`. Off by default.
    pub decode_entities: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            decode_entities: false,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_decode_entities(mut self, decode: bool) -> Self {
        self.decode_entities = decode;
        self
    }
}

/// Parse CSV text with the default options.
///
/// # Examples
/// ```
/// use ainews_feed::parser::parse;
///
/// let csv = "title,date,source,category,description,url\n\
///            \"Big, Announcement\",2024-01-05,TechSite,AI,\
///            \"Has a comma, here\",\"http://x.test\"\n\
///            ,2024-01-04,TechSite,,desc,http://y.test\n";
/// let articles = parse(csv);
/// assert_eq!(articles.len(), 1);
/// assert_eq!(articles[0].title, "Big, Announcement");
/// assert_eq!(articles[0].description, "Has a comma, here");
/// ```
#[must_use]
pub fn parse(raw: &str) -> Vec<ArticleRecord> {
    parse_with(raw, &ParseOptions::default())
}

/// Parse CSV text with explicit options.
#[must_use]
pub fn parse_with(raw: &str, options: &ParseOptions) -> Vec<ArticleRecord> {
    let mut lines = raw
        .split('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        tracing::debug!("CSV input has no header row");
        return Vec::new();
    };

    let layout = ColumnLayout::from_header(&split_fields(header_line, options.delimiter));
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (line_number, line) in lines {
        let fields = split_fields(line, options.delimiter);
        match layout.build(&fields, options) {
            Some(record) => records.push(record),
            None => {
                tracing::trace!(line = line_number, "Dropping row without title");
                dropped += 1;
            }
        }
    }

    tracing::debug!(records = records.len(), dropped, "Parsed article CSV");
    records
}

/// Split one line into cleaned field values.
///
/// # Examples
/// ```
/// use ainews_feed::parser::split_fields;
///
/// assert_eq!(split_fields(r#"a,"b, c", d "#, ','), vec!["a", "b, c", "d"]);
/// ```
#[must_use]
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    scan_fields(line, delimiter)
        .iter()
        .map(|field| clean_field(field))
        .collect()
}

/// Character scan with a single in-quotes flag. Fields are returned raw.
fn scan_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut previous: Option<char> = None;

    for ch in line.chars() {
        if ch == '"' && previous != Some('\\') {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        previous = Some(ch);
    }
    fields.push(current);

    fields
}

/// Strip one wrapping `"` on each side, then surrounding whitespace.
///
/// # Examples
/// ```
/// use ainews_feed::parser::clean_field;
///
/// assert_eq!(clean_field("\"http://x.test\""), "http://x.test");
/// assert_eq!(clean_field("  padded  "), "padded");
/// ```
#[must_use]
pub fn clean_field(raw: &str) -> String {
    let unquoted = raw.strip_prefix('"').unwrap_or(raw);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    unquoted.trim().to_string()
}

/// Positions of the known columns in the header.
#[derive(Debug, Default)]
struct ColumnLayout {
    title: Option<usize>,
    description: Option<usize>,
    summary: Option<usize>,
    url: Option<usize>,
    source: Option<usize>,
    category: Option<usize>,
    date: Option<usize>,
    extra: Vec<(usize, String)>,
}

impl ColumnLayout {
    /// Known columns match case-insensitively; the first occurrence wins.
    fn from_header(headers: &[String]) -> Self {
        let mut layout = Self::default();

        for (index, name) in headers.iter().enumerate() {
            let slot = match name.to_ascii_lowercase().as_str() {
                columns::TITLE => &mut layout.title,
                columns::DESCRIPTION => &mut layout.description,
                columns::SUMMARY => &mut layout.summary,
                columns::URL => &mut layout.url,
                columns::SOURCE => &mut layout.source,
                columns::CATEGORY => &mut layout.category,
                columns::DATE => &mut layout.date,
                _ => {
                    if !name.is_empty() {
                        layout.extra.push((index, name.clone()));
                    }
                    continue;
                }
            };
            slot.get_or_insert(index);
        }

        if layout.title.is_none() {
            tracing::warn!(
                ?headers,
                "CSV header has no title column; every row will be dropped"
            );
        }
        layout
    }

    fn build(&self, fields: &[String], options: &ParseOptions) -> Option<ArticleRecord> {
        let get = |column: Option<usize>| field_at(fields, column);

        let title = get(self.title);
        if title.is_empty() {
            return None;
        }

        let description = match self.description {
            Some(_) => get(self.description),
            None => get(self.summary),
        };

        let raw_date = get(self.date).to_string();
        let extra: BTreeMap<String, String> = self
            .extra
            .iter()
            .map(|(index, name)| (name.clone(), get(Some(*index)).to_string()))
            .collect();

        Some(ArticleRecord {
            title: decode(title, options),
            description: decode(description, options),
            url: get(self.url).to_string(),
            source: get(self.source).to_string(),
            category: normalize_category(get(self.category)),
            date: parse_date(&raw_date),
            raw_date,
            extra,
        })
    }
}

/// Value at a column position, empty when the column or the value is missing.
fn field_at(fields: &[String], column: Option<usize>) -> &str {
    column
        .and_then(|index| fields.get(index))
        .map_or("", String::as_str)
}

fn decode(value: &str, options: &ParseOptions) -> String {
    if options.decode_entities {
        decode_entities(value).into_owned()
    } else {
        value.to_string()
    }
}
