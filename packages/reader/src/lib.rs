//! AI News reader - Fetch the daily AI news CSV and browse it in the terminal.
//!
//! The feed is published as a CSV file plus a small `last_update.json`,
//! either on a web server or on local disk. This crate retrieves both and
//! hands the articles to [`ainews_feed`] for filtering and paging.
//!
//! # Example
//!
//! ```
//! use ainews_reader::source::Source;
//!
//! let source: Source = "https://news.example.test/data/ai_news.csv".parse().unwrap();
//! assert!(source.is_remote());
//! assert_eq!(
//!     source.sibling("last_update.json").unwrap().to_string(),
//!     "https://news.example.test/data/last_update.json"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and [`ReaderConfig`]
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client with retries
//! - [`source`]: URL/path sources and the [`Fetcher`]
//! - [`loader`]: Loading the CSV and its timestamp
//! - [`render`]: Card and list views for the terminal
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod loader;
pub mod render;
pub mod source;

pub use config::ReaderConfig;
pub use error::{ReaderError, Result};
pub use loader::{load_feed, LoadedFeed};
pub use render::{Renderer, ViewMode};
pub use source::{Fetcher, Source};
