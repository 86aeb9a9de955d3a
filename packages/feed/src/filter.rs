//! Search, category and date filters over a loaded article list.
//!
//! Filters are plain values evaluated against an explicit reference date,
//! so the same filter always gives the same answer for the same snapshot.

use std::str::FromStr;

use chrono::{Days, NaiveDate};

use crate::article::ArticleRecord;
use crate::error::{FeedError, Result};
use crate::text::contains_ignore_case;

/// Category selection. Exactly `"all"` or a blank string selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact match on the normalized category.
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, article: &ArticleRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => article.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "all" {
            Ok(Self::All)
        } else {
            Ok(Self::Only(trimmed.to_string()))
        }
    }
}

/// Publication date window.
///
/// Records without a parseable date only pass [`DateWindow::Any`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateWindow {
    #[default]
    Any,
    /// Published on the reference date.
    Today,
    /// Published within `n` days before the reference date, inclusive.
    LastDays(u32),
    /// Published between two dates, inclusive on both ends.
    Between { from: NaiveDate, to: NaiveDate },
}

impl DateWindow {
    /// Build a [`DateWindow::Between`], rejecting reversed bounds.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(FeedError::InvalidDateRange { from, to });
        }
        Ok(Self::Between { from, to })
    }

    /// Whether a record date falls inside the window.
    #[must_use]
    pub fn contains(&self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        let Some(date) = date else {
            return matches!(self, Self::Any);
        };
        match *self {
            Self::Any => true,
            Self::Today => date == today,
            Self::LastDays(days) => {
                let start = today
                    .checked_sub_days(Days::new(u64::from(days)))
                    .unwrap_or(NaiveDate::MIN);
                start <= date && date <= today
            }
            Self::Between { from, to } => from <= date && date <= to,
        }
    }
}

/// Combined filter: every configured criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilter {
    /// Lowercased, trimmed search text. `None` matches everything.
    search: Option<String>,
    pub category: CategoryFilter,
    pub window: DateWindow,
}

impl FeedFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search query. A blank query clears it.
    #[must_use]
    pub fn with_search(mut self, query: &str) -> Self {
        let query = query.trim().to_lowercase();
        self.search = (!query.is_empty()).then_some(query);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// The active search query, lowercased.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// True when any criterion narrows the list.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.search.is_some()
            || self.category != CategoryFilter::All
            || self.window != DateWindow::Any
    }

    /// Search covers title, description, source and category.
    #[must_use]
    pub fn matches(&self, article: &ArticleRecord, today: NaiveDate) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |query| {
            contains_ignore_case(&article.title, query)
                || contains_ignore_case(&article.description, query)
                || contains_ignore_case(&article.source, query)
                || contains_ignore_case(&article.category, query)
        });

        search_ok && self.category.matches(article) && self.window.contains(article.date, today)
    }

    /// Matching articles, in input order.
    #[must_use]
    pub fn apply(&self, articles: &[ArticleRecord], today: NaiveDate) -> Vec<ArticleRecord> {
        articles
            .iter()
            .filter(|article| self.matches(article, today))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<ArticleRecord> {
        vec![
            ArticleRecord::new("OpenAI ships model", "2024-03-10", "TechCrunch", "product")
                .with_description("A new GPT release"),
            ArticleRecord::new("Alignment paper", "2024-03-08", "arXiv", "research")
                .with_description("Safety study"),
            ArticleRecord::new("Funding round", "2024-02-01", "VentureBeat", "business"),
            ArticleRecord::new("Undated note", "soon", "Blog", ""),
        ]
    }

    fn titles(articles: &[ArticleRecord]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = FeedFilter::new();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&sample(), day(2024, 3, 10)).len(), 4);
    }

    #[test]
    fn test_search_case_insensitive_across_fields() {
        let today = day(2024, 3, 10);
        let articles = sample();

        let by_title = FeedFilter::new().with_search("OPENAI");
        assert_eq!(titles(&by_title.apply(&articles, today)), vec!["OpenAI ships model"]);

        let by_description = FeedFilter::new().with_search("gpt");
        assert_eq!(titles(&by_description.apply(&articles, today)), vec!["OpenAI ships model"]);

        let by_source = FeedFilter::new().with_search("arxiv");
        assert_eq!(titles(&by_source.apply(&articles, today)), vec!["Alignment paper"]);

        let by_category = FeedFilter::new().with_search("uncategor");
        assert_eq!(titles(&by_category.apply(&articles, today)), vec!["Undated note"]);
    }

    #[test]
    fn test_blank_search_clears() {
        let filter = FeedFilter::new().with_search("gpt").with_search("   ");
        assert_eq!(filter.search(), None);
    }

    #[test]
    fn test_category_filter() {
        let filter = FeedFilter::new().with_category("research".parse().unwrap());
        let result = filter.apply(&sample(), day(2024, 3, 10));
        assert_eq!(titles(&result), vec!["Alignment paper"]);
    }

    #[test]
    fn test_category_parse_all() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            " AI ".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only("AI".to_string())
        );
    }

    #[test]
    fn test_category_named_all_is_selectable() {
        assert_eq!(
            "All".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only("All".to_string())
        );

        let articles = vec![
            ArticleRecord::new("Roundup", "2024-03-01", "S", "All"),
            ArticleRecord::new("Paper", "2024-03-01", "S", "research"),
        ];
        let filter = FeedFilter::new().with_category("All".parse().unwrap());
        let result = filter.apply(&articles, day(2024, 3, 10));
        assert_eq!(titles(&result), vec!["Roundup"]);
    }

    #[test]
    fn test_today_window() {
        let filter = FeedFilter::new().with_window(DateWindow::Today);
        let result = filter.apply(&sample(), day(2024, 3, 10));
        assert_eq!(titles(&result), vec!["OpenAI ships model"]);
    }

    #[test]
    fn test_last_days_window_inclusive() {
        let filter = FeedFilter::new().with_window(DateWindow::LastDays(2));
        let result = filter.apply(&sample(), day(2024, 3, 10));
        assert_eq!(titles(&result), vec!["OpenAI ships model", "Alignment paper"]);
    }

    #[test]
    fn test_between_window() {
        let window = DateWindow::between(day(2024, 2, 1), day(2024, 3, 8)).unwrap();
        let filter = FeedFilter::new().with_window(window);
        let result = filter.apply(&sample(), day(2024, 3, 10));
        assert_eq!(titles(&result), vec!["Alignment paper", "Funding round"]);
    }

    #[test]
    fn test_between_rejects_reversed() {
        let err = DateWindow::between(day(2024, 3, 1), day(2024, 2, 1));
        assert!(matches!(err, Err(FeedError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_undated_only_in_any() {
        let today = day(2024, 3, 10);
        assert!(DateWindow::Any.contains(None, today));
        assert!(!DateWindow::Today.contains(None, today));
        assert!(!DateWindow::LastDays(365).contains(None, today));
    }

    #[test]
    fn test_future_dates_outside_last_days() {
        let today = day(2024, 3, 10);
        assert!(!DateWindow::LastDays(7).contains(Some(day(2024, 3, 11)), today));
    }

    #[test]
    fn test_combined_criteria() {
        let filter = FeedFilter::new()
            .with_search("a")
            .with_category(CategoryFilter::Only("business".to_string()))
            .with_window(DateWindow::LastDays(60));
        assert!(filter.is_active());
        let result = filter.apply(&sample(), day(2024, 3, 10));
        assert_eq!(titles(&result), vec!["Funding round"]);
    }
}
