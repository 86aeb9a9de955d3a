//! AI News feed core.
//!
//! This library turns the collector's `ai_news.csv` into article records and
//! provides the consumer pipeline on top of them:
//! - Parsing the quote-aware CSV dialect into [`ArticleRecord`]s
//! - Lenient date handling and newest-first ordering
//! - Search, category and date-window filters
//! - An explicit [`FeedState`] with "load more" pagination
//!
//! # Example
//!
//! ```
//! use ainews_feed::{parse, FeedState};
//! use chrono::NaiveDate;
//!
//! let csv = "title,date,source,category\n\
//!            Older,2024-01-04,TechSite,research\n\
//!            Newer,2024-01-05,TechSite,AI\n";
//! let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//!
//! let state = FeedState::new(parse(csv), today).with_search("tech");
//! let page = state.page();
//! assert_eq!(page.items[0].title, "Newer");
//! assert!(!page.has_more);
//! ```

pub mod article;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod last_update;
pub mod parser;
pub mod sort;
pub mod state;
pub mod stats;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used items
pub use article::ArticleRecord;
pub use error::{FeedError, Result};
pub use filter::{CategoryFilter, DateWindow, FeedFilter};
pub use last_update::LastUpdate;
pub use parser::{parse, parse_with, ParseOptions};
pub use sort::sort_newest_first;
pub use state::{FeedPage, FeedState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_reexports() {
        let _filter = FeedFilter::new();
        let _window = DateWindow::Any;
        let _err = FeedError::InvalidPageSize(0);
        assert!(parse("").is_empty());
    }
}
