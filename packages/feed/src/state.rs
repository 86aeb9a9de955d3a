//! Explicit feed state: loaded snapshot, active filter and pagination.
//!
//! Every transition returns a new [`FeedState`]; the snapshot is shared
//! through an `Arc` and is never mutated, so a state handed to a renderer
//! stays consistent while the next one is being built.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::article::ArticleRecord;
use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{FeedError, Result};
use crate::filter::{CategoryFilter, DateWindow, FeedFilter};
use crate::sort::sort_newest_first;

/// The slice of the filtered list currently revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedPage {
    /// Matching articles from the top of the list up to the current page.
    pub items: Vec<ArticleRecord>,

    /// Number of articles matching the filter.
    pub total_matches: usize,

    /// Current page (1-based).
    pub page: usize,

    /// Whether "load more" would reveal further articles.
    pub has_more: bool,
}

impl FeedPage {
    #[must_use]
    pub fn shown(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Loaded articles plus the view over them.
#[derive(Debug, Clone)]
pub struct FeedState {
    articles: Arc<[ArticleRecord]>,
    filter: FeedFilter,
    today: NaiveDate,
    page: usize,
    page_size: usize,
}

impl FeedState {
    /// Start a state from freshly parsed articles, sorted newest first.
    ///
    /// `today` is the reference date for relative date windows.
    #[must_use]
    pub fn new(mut articles: Vec<ArticleRecord>, today: NaiveDate) -> Self {
        sort_newest_first(&mut articles);
        Self {
            articles: articles.into(),
            filter: FeedFilter::default(),
            today,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Replace the snapshot with a fresh load. Filter and page size are
    /// kept; pagination restarts.
    #[must_use]
    pub fn reload(&self, articles: Vec<ArticleRecord>) -> Self {
        let fresh = Self::new(articles, self.today);
        Self {
            filter: self.filter.clone(),
            page_size: self.page_size,
            ..fresh
        }
    }

    /// Change the page size (1..=`MAX_PAGE_SIZE`) and restart pagination.
    pub fn with_page_size(&self, page_size: usize) -> Result<Self> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(FeedError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_size,
            page: 1,
            ..self.clone()
        })
    }

    /// Move the reference date used by relative windows.
    #[must_use]
    pub fn with_today(&self, today: NaiveDate) -> Self {
        Self {
            today,
            page: 1,
            ..self.clone()
        }
    }

    /// Replace the whole filter and restart pagination.
    #[must_use]
    pub fn with_filter(&self, filter: FeedFilter) -> Self {
        Self {
            filter,
            page: 1,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_search(&self, query: &str) -> Self {
        self.with_filter(self.filter.clone().with_search(query))
    }

    #[must_use]
    pub fn with_category(&self, category: CategoryFilter) -> Self {
        self.with_filter(self.filter.clone().with_category(category))
    }

    #[must_use]
    pub fn with_window(&self, window: DateWindow) -> Self {
        self.with_filter(self.filter.clone().with_window(window))
    }

    /// Reveal the next page. No-op once everything is shown.
    #[must_use]
    pub fn load_more(&self) -> Self {
        if self.page * self.page_size >= self.match_count() {
            return self.clone();
        }
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }

    /// Current view: the first `page * page_size` matches.
    #[must_use]
    pub fn page(&self) -> FeedPage {
        let limit = self.page * self.page_size;
        let mut total_matches = 0;
        let mut items = Vec::new();

        for article in self.matching() {
            if total_matches < limit {
                items.push(article.clone());
            }
            total_matches += 1;
        }

        FeedPage {
            has_more: total_matches > items.len(),
            items,
            total_matches,
            page: self.page,
        }
    }

    /// All matching articles in display order.
    pub fn matching(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.articles
            .iter()
            .filter(move |article| self.filter.matches(article, self.today))
    }

    /// Distinct categories in the snapshot, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.articles
            .iter()
            .map(|article| article.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The full snapshot, newest first.
    #[must_use]
    pub fn articles(&self) -> &[ArticleRecord] {
        &self.articles
    }

    #[must_use]
    pub fn filter(&self) -> &FeedFilter {
        &self.filter
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn match_count(&self) -> usize {
        self.matching().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    /// 25 articles dated 2024-03-01..=2024-03-25, alternating categories.
    fn articles() -> Vec<ArticleRecord> {
        (1..=25)
            .map(|day| {
                let category = if day % 2 == 0 { "research" } else { "product" };
                ArticleRecord::new(
                    format!("Article {day}"),
                    format!("2024-03-{day:02}"),
                    "Source",
                    category,
                )
            })
            .collect()
    }

    #[test]
    fn test_new_sorts_newest_first() {
        let state = FeedState::new(articles(), today());
        assert_eq!(state.articles()[0].title, "Article 25");
        assert_eq!(state.articles()[24].title, "Article 1");
    }

    #[test]
    fn test_first_page() {
        let page = FeedState::new(articles(), today()).page();
        assert_eq!(page.shown(), 10);
        assert_eq!(page.total_matches, 25);
        assert_eq!(page.page, 1);
        assert!(page.has_more);
    }

    #[test]
    fn test_load_more_until_exhausted() {
        let state = FeedState::new(articles(), today());
        let second = state.load_more();
        assert_eq!(second.page().shown(), 20);
        assert!(second.page().has_more);

        let third = second.load_more();
        let page = third.page();
        assert_eq!(page.shown(), 25);
        assert!(!page.has_more);

        let fourth = third.load_more();
        assert_eq!(fourth.page_number(), 3);
    }

    #[test]
    fn test_filter_resets_page() {
        let state = FeedState::new(articles(), today()).load_more();
        assert_eq!(state.page_number(), 2);

        let filtered = state.with_category(CategoryFilter::Only("research".to_string()));
        assert_eq!(filtered.page_number(), 1);
        let page = filtered.page();
        assert_eq!(page.total_matches, 12);
        assert_eq!(page.shown(), 10);
        assert_eq!(page.items[0].title, "Article 24");
    }

    #[test]
    fn test_transitions_leave_original_untouched() {
        let state = FeedState::new(articles(), today());
        let searched = state.with_search("Article 2");
        assert_eq!(state.page().total_matches, 25);
        // "Article 2" plus "Article 20".."Article 25"
        assert_eq!(searched.page().total_matches, 7);
    }

    #[test]
    fn test_window_uses_reference_date() {
        let state = FeedState::new(articles(), today()).with_window(DateWindow::LastDays(7));
        assert_eq!(state.page().total_matches, 2);

        let earlier = state.with_today(NaiveDate::from_ymd_opt(2024, 3, 25).unwrap());
        assert_eq!(earlier.page().total_matches, 8);
    }

    #[test]
    fn test_page_size_validation() {
        let state = FeedState::new(articles(), today());
        assert!(matches!(state.with_page_size(0), Err(FeedError::InvalidPageSize(0))));
        assert!(state.with_page_size(MAX_PAGE_SIZE + 1).is_err());

        let page = state.with_page_size(5).unwrap().page();
        assert_eq!(page.shown(), 5);
    }

    #[test]
    fn test_empty_result() {
        let page = FeedState::new(articles(), today()).with_search("nothing here").page();
        assert!(page.is_empty());
        assert_eq!(page.total_matches, 0);
        assert!(!page.has_more);
    }

    #[test]
    fn test_categories_distinct_sorted() {
        let state = FeedState::new(articles(), today());
        assert_eq!(state.categories(), vec!["product", "research"]);
    }

    #[test]
    fn test_reload_keeps_filter() {
        let state = FeedState::new(articles(), today())
            .with_search("Article 1")
            .load_more();
        let reloaded = state.reload(vec![ArticleRecord::new(
            "Article 100",
            "2024-03-30",
            "S",
            "x",
        )]);
        assert_eq!(reloaded.page_number(), 1);
        assert_eq!(reloaded.filter().search(), Some("article 1"));
        assert_eq!(reloaded.page().total_matches, 1);
    }
}
