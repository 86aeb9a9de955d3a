//! WASM bindings for the news page.
//!
//! Feature-gated behind `wasm`. The page fetches `ai_news.csv` itself and
//! hands the text over; everything after that (parse, filter, paginate) runs
//! here.
//!
//! # Key Constraints
//!
//! - **No clock access**: the reference date for relative windows is passed
//!   in by the page as `YYYY-MM-DD`.
//! - **Bounded input**: CSV text above `MAX_CSV_SIZE` is rejected.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { WasmFeed } from 'ainews-feed';
//!
//! await init();
//! const feed = new WasmFeed();
//!
//! const response = await fetch('data/ai_news.csv');
//! const count = feed.loadCsv(await response.text(), '2024-01-05');
//!
//! feed.setSearch('openai');
//! const page = feed.page();   // { items, total_matches, page, has_more }
//! if (page.has_more) feed.loadMore();
//! ```

use wasm_bindgen::prelude::*;

use crate::config::MAX_CSV_SIZE;
use crate::dates::parse_iso_date;
use crate::error::FeedError;
use crate::filter::{CategoryFilter, DateWindow};
use crate::parser::parse;
use crate::state::FeedState;

impl From<FeedError> for JsValue {
    fn from(err: FeedError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn wasm_error(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

/// Feed state held on the WASM side of the page.
#[wasm_bindgen]
pub struct WasmFeed {
    state: Option<FeedState>,
}

#[wasm_bindgen]
impl WasmFeed {
    /// Create an empty feed. Call `loadCsv()` before anything else.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Parse CSV text and replace the loaded articles.
    ///
    /// # Arguments
    /// * `csv` - Full text of the CSV file
    /// * `today` - Reference date (`YYYY-MM-DD`) for relative date windows
    ///
    /// # Returns
    /// Number of articles loaded.
    #[wasm_bindgen(js_name = loadCsv)]
    pub fn load_csv(&mut self, csv: &str, today: &str) -> Result<usize, JsValue> {
        if csv.len() > MAX_CSV_SIZE {
            return Err(FeedError::InputTooLarge {
                size: csv.len(),
                max: MAX_CSV_SIZE,
            }
            .into());
        }
        let today = parse_iso_date(today)?;
        let articles = parse(csv);
        let count = articles.len();

        self.state = Some(match &self.state {
            Some(state) => state.reload(articles).with_today(today),
            None => FeedState::new(articles, today),
        });
        Ok(count)
    }

    /// Set the search query; an empty string clears it.
    #[wasm_bindgen(js_name = setSearch)]
    pub fn set_search(&mut self, query: &str) -> Result<(), JsValue> {
        let next = self.state()?.with_search(query);
        self.state = Some(next);
        Ok(())
    }

    /// Select a category; `"all"` selects everything.
    #[wasm_bindgen(js_name = setCategory)]
    pub fn set_category(&mut self, category: &str) -> Result<(), JsValue> {
        let filter = category
            .parse::<CategoryFilter>()
            .unwrap_or(CategoryFilter::All);
        let next = self.state()?.with_category(filter);
        self.state = Some(next);
        Ok(())
    }

    /// Keep articles from the last `days` days.
    #[wasm_bindgen(js_name = setLastDays)]
    pub fn set_last_days(&mut self, days: u32) -> Result<(), JsValue> {
        let next = self.state()?.with_window(DateWindow::LastDays(days));
        self.state = Some(next);
        Ok(())
    }

    /// Keep articles between two `YYYY-MM-DD` dates, inclusive.
    #[wasm_bindgen(js_name = setDateRange)]
    pub fn set_date_range(&mut self, from: &str, to: &str) -> Result<(), JsValue> {
        let window = DateWindow::between(parse_iso_date(from)?, parse_iso_date(to)?)?;
        let next = self.state()?.with_window(window);
        self.state = Some(next);
        Ok(())
    }

    /// Remove any date window.
    #[wasm_bindgen(js_name = clearDateWindow)]
    pub fn clear_date_window(&mut self) -> Result<(), JsValue> {
        let next = self.state()?.with_window(DateWindow::Any);
        self.state = Some(next);
        Ok(())
    }

    /// Reveal the next page of results.
    #[wasm_bindgen(js_name = loadMore)]
    pub fn load_more(&mut self) -> Result<(), JsValue> {
        let next = self.state()?.load_more();
        self.state = Some(next);
        Ok(())
    }

    /// Current page as `{ items, total_matches, page, has_more }`.
    pub fn page(&self) -> Result<JsValue, JsValue> {
        let page = self.state()?.page();
        serde_wasm_bindgen::to_value(&page)
            .map_err(|e| wasm_error(&format!("Failed to serialize page: {}", e)))
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Result<Vec<String>, JsValue> {
        Ok(self.state()?.categories())
    }

    /// Number of loaded articles (0 before `loadCsv()`).
    #[wasm_bindgen(js_name = articleCount)]
    pub fn article_count(&self) -> usize {
        self.state.as_ref().map_or(0, |state| state.articles().len())
    }

    /// Get the library version.
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

impl WasmFeed {
    fn state(&self) -> Result<&FeedState, JsValue> {
        self.state
            .as_ref()
            .ok_or_else(|| wasm_error("No feed loaded; call loadCsv() first"))
    }
}

impl Default for WasmFeed {
    fn default() -> Self {
        Self::new()
    }
}
