//! Aggregate counts behind the category and timeline overviews.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::article::ArticleRecord;

/// Number of articles per category.
#[must_use]
pub fn category_counts(articles: &[ArticleRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for article in articles {
        *counts.entry(article.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// Number of articles per publication date. Undated articles are skipped.
#[must_use]
pub fn timeline_counts(articles: &[ArticleRecord]) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for date in articles.iter().filter_map(|article| article.date) {
        *counts.entry(date).or_insert(0) += 1;
    }
    counts
}
