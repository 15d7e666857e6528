// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::browser::ChromeLauncher;
use crate::config::consts::{DEFAULT_WEBDRIVER_URL, PREVIEW_ROWS, READY_TIMEOUT};
use crate::config::options::{AppOptions, ExportOptions, ScrapeOptions, SourceKind, WriteMode};
use crate::csv::rows_to_string;
use crate::error::ScrapeError;
use crate::progress::ConsoleProgress;
use crate::runner::{self, RunSummary};
use crate::specs::SourceSpec;

/// Scrape movie listings by genre into a CSV file.
///
/// Needs a chromedriver listening at --webdriver (default http://localhost:9515).
#[derive(Parser, Debug)]
#[command(name = "movie_scrape", version)]
pub struct Cli {
    /// Site to scrape
    #[arg(short, long, value_enum, default_value_t = SourceKind::RottenTomatoes)]
    pub source: SourceKind,

    /// Category to scrape; repeat for several. Defaults depend on the source
    #[arg(short, long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Maximum records per category (IMDb: 50, Rotten Tomatoes: 5)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Overwrite or append to the output file (IMDb: overwrite, Rotten Tomatoes: append)
    #[arg(long, value_enum)]
    pub mode: Option<WriteMode>,

    /// Output file, or directory for the source's default file name
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// WebDriver server URL
    #[arg(long, env = "WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver: String,

    /// Seconds to wait for the result list to appear
    #[arg(long, value_name = "SECS", default_value_t = READY_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Skip the pause between page load and the readiness wait
    #[arg(long)]
    pub no_settle: bool,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Print the source's categories and exit
    #[arg(long)]
    pub list_categories: bool,

    /// Rows to preview after saving (0 disables)
    #[arg(long, value_name = "N", default_value_t = PREVIEW_ROWS)]
    pub preview: usize,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> AppOptions {
        AppOptions {
            scrape: ScrapeOptions {
                source: self.source,
                categories: self.categories.clone(),
                limit: self.limit,
                ready_timeout: Duration::from_secs(self.timeout),
                settle: !self.no_settle,
                ..ScrapeOptions::default()
            },
            export: ExportOptions {
                mode: self.mode,
                out: self.out.clone(),
                preview_rows: self.preview,
            },
        }
    }
}

pub async fn run(cli: Cli) -> Result<(), ScrapeError> {
    if cli.list_categories {
        print!("{}", category_listing(&SourceSpec::for_kind(cli.source)));
        return Ok(());
    }

    let opts = cli.options();
    let launcher = ChromeLauncher::new(cli.webdriver.as_str(), !cli.headed);
    let mut progress = ConsoleProgress::default();

    let summary = runner::run(&opts, &launcher, &mut progress).await?;
    if let Some(preview) = preview_text(&summary, opts.export.preview_rows) {
        print!("{preview}");
    }
    Ok(())
}

/// One `key,url` line per category, in catalog order.
pub fn category_listing(spec: &SourceSpec) -> String {
    spec.catalog
        .entries()
        .iter()
        .map(|e| format!("{},{}\n", e.key, e.url))
        .collect()
}

/// The first `n` scraped rows under the source's header, or `None` when
/// previews are off or nothing was saved.
pub fn preview_text(summary: &RunSummary, n: usize) -> Option<String> {
    if n == 0 || summary.writes.is_empty() {
        return None;
    }
    let first = summary.reports.iter().find(|r| !r.batch.is_empty())?;
    let rows: Vec<Vec<String>> = summary
        .reports
        .iter()
        .flat_map(|r| r.batch.rows())
        .take(n)
        .collect();
    Some(format!(
        "\nFirst {} row(s) of the scraped data:\n{}",
        rows.len(),
        rows_to_string(Some(first.batch.columns.as_slice()), &rows)
    ))
}
