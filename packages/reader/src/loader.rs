//! Loading the feed: the article CSV plus its optional timestamp.

use ainews_feed::{parse_with, ArticleRecord, LastUpdate};

use crate::config::ReaderConfig;
use crate::error::Result;
use crate::source::{Fetcher, Source};

/// Everything one load produced.
#[derive(Debug, Clone)]
pub struct LoadedFeed {
    /// Parsed records in file order.
    pub articles: Vec<ArticleRecord>,

    /// When the collector last ran, if the timestamp file was readable.
    pub last_update: Option<LastUpdate>,

    /// Where the articles came from.
    pub source: Source,
}

/// Fetch and parse the CSV named by `config`, then try its timestamp.
///
/// Failing to retrieve the CSV is an error. A missing or malformed
/// timestamp file is logged and yields `last_update: None`.
pub fn load_feed(config: &ReaderConfig) -> Result<LoadedFeed> {
    let fetcher = Fetcher::new()?.with_max_size(config.max_response_size);
    load_feed_with(&fetcher, config)
}

/// [`load_feed`] with a caller-supplied fetcher.
pub fn load_feed_with(fetcher: &Fetcher, config: &ReaderConfig) -> Result<LoadedFeed> {
    let text = fetcher.fetch_text(&config.source)?;
    let articles = parse_with(&text, &config.parse_options);
    tracing::info!(
        source = %config.source,
        articles = articles.len(),
        "Loaded news feed"
    );

    let last_update = config
        .timestamp
        .as_ref()
        .and_then(|source| load_last_update(fetcher, source));

    Ok(LoadedFeed {
        articles,
        last_update,
        source: config.source.clone(),
    })
}

fn load_last_update(fetcher: &Fetcher, source: &Source) -> Option<LastUpdate> {
    let text = match fetcher.fetch_text(source) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "Could not load last update time");
            return None;
        }
    };

    match LastUpdate::from_json(&text) {
        Ok(update) => Some(update),
        Err(e) => {
            tracing::warn!(source = %source, error = %e, "Ignoring malformed last update file");
            None
        }
    }
}
