//! Configuration constants for the feed core.
//!
//! The defaults match the layout the collector publishes: a comma-delimited
//! `ai_news.csv` with a header row, read ten articles at a time.

/// Field delimiter used by the collector.
pub const DEFAULT_DELIMITER: char = ',';

/// Category assigned when the column is absent or blank.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Articles revealed per page ("load more" step).
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound for a caller-supplied page size.
pub const MAX_PAGE_SIZE: usize = 500;

/// Maximum CSV size accepted through the WASM bindings (16 MB).
///
/// The native loader streams whatever the source returns; the browser side
/// holds the whole text plus the parsed records in linear memory.
pub const MAX_CSV_SIZE: usize = 16 * 1024 * 1024;

/// Column names recognised by the parser. Any other header goes to
/// [`ArticleRecord::extra`](crate::article::ArticleRecord::extra).
pub mod columns {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const SUMMARY: &str = "summary";
    pub const URL: &str = "url";
    pub const SOURCE: &str = "source";
    pub const CATEGORY: &str = "category";
    pub const DATE: &str = "date";
}
