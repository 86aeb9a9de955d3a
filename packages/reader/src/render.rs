//! Terminal rendering of feed pages.
//!
//! Renderers build plain `String`s so output can be tested without a
//! terminal; styling is only applied when `color` is enabled.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;
use clap::ValueEnum;
use console::{style, StyledObject};

use ainews_feed::{ArticleRecord, FeedPage, LastUpdate};

/// Message shown when no article passes the filters.
pub const EMPTY_MESSAGE: &str = "No news items found.";

/// Default wrap width when the terminal size is unknown.
pub const DEFAULT_WIDTH: usize = 80;

/// Longest bar drawn by the stats view.
const MAX_BAR_WIDTH: usize = 40;

/// How a page of articles is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    /// One block per article with its description.
    #[default]
    Cards,
    /// One line per article.
    List,
}

/// Color family for a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryTone {
    Danger,
    Primary,
    Info,
    Success,
    Warning,
    Secondary,
}

/// Pick a badge tone from keywords in the category name.
///
/// Rules are checked in order, so "AI research" is [`CategoryTone::Danger`].
#[must_use]
pub fn category_tone(category: &str) -> CategoryTone {
    let lower = category.to_lowercase();
    if lower.contains("ai") || lower.contains("artificial intelligence") {
        CategoryTone::Danger
    } else if lower.contains("ml") || lower.contains("machine learning") {
        CategoryTone::Primary
    } else if lower.contains("research") {
        CategoryTone::Info
    } else if lower.contains("business") || lower.contains("industry") {
        CategoryTone::Success
    } else if lower.contains("ethics") || lower.contains("policy") {
        CategoryTone::Warning
    } else {
        CategoryTone::Secondary
    }
}

/// Formats pages, categories and stats for the terminal.
#[derive(Debug, Clone)]
pub struct Renderer {
    view: ViewMode,
    width: usize,
    color: bool,
}

impl Renderer {
    #[must_use]
    pub fn new(view: ViewMode) -> Self {
        Self {
            view,
            width: DEFAULT_WIDTH,
            color: false,
        }
    }

    #[must_use]
    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    /// Wrap width for descriptions (at least 20 columns).
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(20);
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Render one page, followed by a hint when more matches remain.
    #[must_use]
    pub fn page(&self, page: &FeedPage) -> String {
        if page.is_empty() {
            return format!("{}\n", self.paint(style(EMPTY_MESSAGE).dim()));
        }

        let mut out = String::new();
        for article in &page.items {
            match self.view {
                ViewMode::Cards => self.card(&mut out, article),
                ViewMode::List => self.list_row(&mut out, article),
            }
        }

        if page.has_more {
            let _ = writeln!(
                out,
                "{}",
                self.paint(
                    style(format!(
                        "Showing {} of {} articles. Use --pages {} to load more.",
                        page.shown(),
                        page.total_matches,
                        page.page + 1
                    ))
                    .dim()
                )
            );
        }
        out
    }

    fn card(&self, out: &mut String, article: &ArticleRecord) {
        let _ = writeln!(
            out,
            "{} {}",
            self.paint(style(&article.title).bold()),
            self.badge(&article.category)
        );
        let _ = writeln!(
            out,
            "{}",
            self.paint(style(format!(
                "{} | Source: {}",
                article.display_date(),
                article.source
            ))
            .dim())
        );
        if !article.description.is_empty() {
            for line in textwrap::wrap(&article.description, self.width) {
                let _ = writeln!(out, "{line}");
            }
        }
        if !article.url.is_empty() {
            let _ = writeln!(out, "{}", self.paint(style(&article.url).underlined()));
        }
        out.push('\n');
    }

    fn list_row(&self, out: &mut String, article: &ArticleRecord) {
        let _ = writeln!(
            out,
            "{}  {} {}",
            self.paint(style(format!("{} | {}", article.display_date(), article.source)).dim()),
            self.paint(style(&article.title).bold()),
            self.badge(&article.category)
        );
    }

    fn badge(&self, category: &str) -> String {
        let label = style(format!("[{category}]"));
        let styled = match category_tone(category) {
            CategoryTone::Danger => label.red(),
            CategoryTone::Primary => label.blue(),
            CategoryTone::Info => label.cyan(),
            CategoryTone::Success => label.green(),
            CategoryTone::Warning => label.yellow(),
            CategoryTone::Secondary => label.dim(),
        };
        self.paint(styled)
    }

    /// "Last updated" line; unknown when the timestamp was not available.
    #[must_use]
    pub fn last_update(&self, update: Option<&LastUpdate>) -> String {
        let when = update.map_or_else(|| "unknown".to_string(), LastUpdate::display);
        format!("{} {}\n", self.paint(style("Last updated:").bold()), when)
    }

    /// Category names with their article counts.
    #[must_use]
    pub fn categories(&self, counts: &BTreeMap<String, usize>) -> String {
        if counts.is_empty() {
            return format!("{EMPTY_MESSAGE}\n");
        }
        let name_width = counts.keys().map(|c| c.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for (category, count) in counts {
            let padding = " ".repeat(name_width - category.chars().count());
            let _ = writeln!(out, "{}{padding}  {count}", self.badge(category));
        }
        out
    }

    /// Per-category and per-day counts as bar charts.
    #[must_use]
    pub fn stats(
        &self,
        categories: &BTreeMap<String, usize>,
        timeline: &BTreeMap<NaiveDate, usize>,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.paint(style("By category").bold()));
        let rows: Vec<(String, usize)> = categories
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        self.bars(&mut out, &rows);

        out.push('\n');
        let _ = writeln!(out, "{}", self.paint(style("By day").bold()));
        let rows: Vec<(String, usize)> = timeline
            .iter()
            .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), *count))
            .collect();
        self.bars(&mut out, &rows);
        out
    }

    fn bars(&self, out: &mut String, rows: &[(String, usize)]) {
        if rows.is_empty() {
            let _ = writeln!(out, "  (none)");
            return;
        }
        let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);

        for (label, count) in rows {
            let len = (count * MAX_BAR_WIDTH).div_ceil(max);
            let padding = " ".repeat(label_width - label.chars().count());
            let _ = writeln!(
                out,
                "  {label}{padding}  {} {count}",
                self.paint(style("#".repeat(len)).cyan())
            );
        }
    }

    fn paint<D: std::fmt::Display>(&self, styled: StyledObject<D>) -> String {
        styled.force_styling(self.color).to_string()
    }
}
