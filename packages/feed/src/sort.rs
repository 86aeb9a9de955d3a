//! Consumer-side ordering. The parser keeps file order; display wants
//! newest first.

use std::cmp::{Ordering, Reverse};

use crate::article::ArticleRecord;

/// Sort newest first. Stable: equal dates keep file order, and records
/// without a parseable date go last in their original order.
pub fn sort_newest_first(articles: &mut [ArticleRecord]) {
    articles.sort_by(compare_newest_first);
}

/// Ordering used by [`sort_newest_first`].
#[must_use]
pub fn compare_newest_first(a: &ArticleRecord, b: &ArticleRecord) -> Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => Reverse(x).cmp(&Reverse(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles(articles: &[ArticleRecord]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[test]
    fn test_newest_first() {
        let mut articles = vec![
            ArticleRecord::new("old", "2023-01-01", "S", "c"),
            ArticleRecord::new("new", "2024-06-01", "S", "c"),
            ArticleRecord::new("mid", "2023-09-15", "S", "c"),
        ];
        sort_newest_first(&mut articles);
        assert_eq!(titles(&articles), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_undated_last_and_stable() {
        let mut articles = vec![
            ArticleRecord::new("bad1", "???", "S", "c"),
            ArticleRecord::new("a", "2024-01-01", "S", "c"),
            ArticleRecord::new("bad2", "", "S", "c"),
            ArticleRecord::new("b", "2024-01-01", "S", "c"),
        ];
        sort_newest_first(&mut articles);
        assert_eq!(titles(&articles), vec!["a", "b", "bad1", "bad2"]);
    }
}
