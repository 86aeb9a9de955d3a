//! Command-line interface for the reader.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use ainews_feed::dates::parse_iso_date;
use ainews_feed::stats::{category_counts, timeline_counts};
use ainews_feed::{DateWindow, FeedFilter, FeedPage, FeedState};

use crate::config::ReaderConfig;
use crate::error::{ReaderError, Result};
use crate::loader::{load_feed, LoadedFeed};
use crate::render::{Renderer, ViewMode, DEFAULT_WIDTH};

/// AI News reader - Browse the daily AI news feed in the terminal.
#[derive(Parser)]
#[command(name = "ainews-reader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CSV location, URL or path (default: $AINEWS_SOURCE or data/ai_news.csv)
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// last_update.json location (default: next to the CSV)
    #[arg(long, global = true)]
    pub timestamp: Option<String>,

    /// Reference date for date filters in YYYY-MM-DD format (default: today)
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Decode HTML entities (`&amp;`, `&#8217;`) in titles and descriptions
    #[arg(long, global = true)]
    pub decode_entities: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show articles, newest first.
    List(ListArgs),

    /// Show categories with article counts.
    Categories {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show article counts per category and per day.
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show when the feed was last refreshed.
    Updated,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive search over title, description, source and category
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Only show this category ("all" shows everything)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only articles from the last N days
    #[arg(long, conflicts_with_all = ["today", "from", "to"])]
    pub days: Option<u32>,

    /// Only articles from today
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub today: bool,

    /// Earliest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Articles per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Number of pages to show
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Layout of each article
    #[arg(long, value_enum, default_value_t = ViewMode::Cards)]
    pub view: ViewMode,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// The filter these flags describe, relative to `today`.
    pub fn filter(&self, today: NaiveDate) -> Result<FeedFilter> {
        let mut filter = FeedFilter::new();
        if let Some(query) = &self.search {
            filter = filter.with_search(query);
        }
        if let Some(category) = &self.category {
            filter = filter.with_category(category.parse().unwrap_or_default());
        }
        Ok(filter.with_window(self.window(today)?))
    }

    fn window(&self, today: NaiveDate) -> Result<DateWindow> {
        if self.today {
            return Ok(DateWindow::Today);
        }
        if let Some(days) = self.days {
            return Ok(DateWindow::LastDays(days));
        }

        let from = self.from.as_deref().map(parse_iso_date).transpose()?;
        let to = self.to.as_deref().map(parse_iso_date).transpose()?;
        match (from, to) {
            (None, None) => Ok(DateWindow::Any),
            (from, to) => Ok(DateWindow::between(
                from.unwrap_or(NaiveDate::MIN),
                to.unwrap_or(today),
            )?),
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute already-parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    let today = match &cli.as_of {
        Some(date) => parse_iso_date(date)?,
        None => chrono::Local::now().date_naive(),
    };
    if cli.no_color {
        console::set_colors_enabled(false);
    }
    let config = build_config(&cli)?;
    let renderer = Renderer::new(ViewMode::Cards)
        .with_width(terminal_width())
        .with_color(console::colors_enabled());

    match &cli.command {
        Commands::List(args) => list_command(&config, args, today, renderer),
        Commands::Categories { json } => categories_command(&config, *json, &renderer),
        Commands::Stats { json } => stats_command(&config, *json, &renderer),
        Commands::Updated => updated_command(&config, &renderer),
    }
}

/// Environment settings with command-line overrides applied.
fn build_config(cli: &Cli) -> Result<ReaderConfig> {
    let mut config = ReaderConfig::from_env()?;

    if let Some(source) = &cli.source {
        config = config.with_source(source.parse()?);
    }

    if let Some(timestamp) = &cli.timestamp {
        config = config.with_timestamp(Some(timestamp.parse()?));
    }

    if cli.decode_entities {
        config = config.with_decode_entities(true);
    }

    if let Commands::List(args) = &cli.command {
        if let Some(page_size) = args.page_size {
            config = config.with_page_size(page_size)?;
        }
    }

    Ok(config)
}

fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map_or(DEFAULT_WIDTH, |(_, cols)| usize::from(cols).min(100))
}

/// Load the feed behind a spinner.
fn load_with_spinner(config: &ReaderConfig) -> Result<LoadedFeed> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Loading news from {}...", config.source));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = load_feed(config);
    pb.finish_and_clear();
    result
}

fn list_command(
    config: &ReaderConfig,
    args: &ListArgs,
    today: NaiveDate,
    renderer: Renderer,
) -> Result<()> {
    if args.pages == 0 {
        return Err(ReaderError::Config("--pages must be at least 1".to_string()));
    }
    let filter = args.filter(today)?;
    let feed = load_with_spinner(config)?;

    let state = FeedState::new(feed.articles, today)
        .with_page_size(config.page_size)?
        .with_filter(filter);
    let (state, page) = show_pages(state, args.pages);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    let renderer = renderer.with_view(args.view);
    print!("{}", renderer.last_update(feed.last_update.as_ref()));
    if state.filter().is_active() {
        println!(
            "{} {} of {} articles",
            style("Matching:").bold(),
            page.total_matches,
            state.articles().len()
        );
    }
    println!();
    print!("{}", renderer.page(&page));
    Ok(())
}

/// Load up to `pages` pages, stopping once every match is shown.
fn show_pages(mut state: FeedState, pages: usize) -> (FeedState, FeedPage) {
    let mut page = state.page();
    for _ in 1..pages {
        if !page.has_more {
            break;
        }
        state = state.load_more();
        page = state.page();
    }
    (state, page)
}

fn categories_command(config: &ReaderConfig, json: bool, renderer: &Renderer) -> Result<()> {
    let feed = load_with_spinner(config)?;
    let counts = category_counts(&feed.articles);

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        print!("{}", renderer.categories(&counts));
    }
    Ok(())
}

fn stats_command(config: &ReaderConfig, json: bool, renderer: &Renderer) -> Result<()> {
    let feed = load_with_spinner(config)?;
    let categories = category_counts(&feed.articles);
    let timeline = timeline_counts(&feed.articles);

    if json {
        let timeline: BTreeMap<String, usize> = timeline
            .iter()
            .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), *count))
            .collect();
        let body = json!({
            "total": feed.articles.len(),
            "categories": categories,
            "timeline": timeline,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!(
            "{} {}",
            style("Articles:").bold(),
            style(feed.articles.len()).cyan()
        );
        println!();
        print!("{}", renderer.stats(&categories, &timeline));
    }
    Ok(())
}

fn updated_command(config: &ReaderConfig, renderer: &Renderer) -> Result<()> {
    let feed = load_with_spinner(config)?;
    print!("{}", renderer.last_update(feed.last_update.as_ref()));
    Ok(())
}
