// src/runner.rs
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;

use futures::FutureExt;
use tracing::{info, warn};

use crate::{
    browser::{Browser, Launcher},
    config::options::{AppOptions, WriteMode},
    engine::{
        types::{ReadyWait, ScrapeBatch, SessionState, SettleDelay},
        Job, ScrapeSession,
    },
    error::ScrapeError,
    file::{resolve_out_path, write_batch, WriteOutcome},
    progress::Progress,
    specs::{CategoryEntry, SourceSpec},
};

/// Everything a run needs, resolved and validated before any browser starts.
#[derive(Debug)]
pub struct Plan {
    pub spec: SourceSpec,
    pub jobs: Vec<Job>,
    /// One `InvalidCategory` per requested name the catalog does not know.
    pub rejected: Vec<ScrapeError>,
    pub mode: WriteMode,
    pub out_path: PathBuf,
    pub ready: ReadyWait,
    pub settle: SettleDelay,
}

/// Outcome of one category session.
pub struct SourceReport {
    pub category: CategoryEntry,
    pub state: SessionState,
    pub batch: ScrapeBatch,
    pub skipped: usize,
    pub error: Option<ScrapeError>,
}

/// Summary of what was produced. Batches are kept even when writing failed.
pub struct RunSummary {
    pub source: &'static str,
    pub reports: Vec<SourceReport>,
    pub writes: Vec<WriteOutcome>,
    pub write_errors: Vec<ScrapeError>,
    /// Requested categories that were skipped as unknown.
    pub rejected: Vec<ScrapeError>,
}

impl RunSummary {
    pub fn total_records(&self) -> usize {
        self.reports.iter().map(|r| r.batch.len()).sum()
    }

    pub fn failed_sessions(&self) -> usize {
        self.reports.iter().filter(|r| r.state == SessionState::Failed).count()
    }

    pub fn files_written(&self) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = Vec::new();
        for w in &self.writes {
            if !out.contains(&w.path) { out.push(w.path.clone()); }
        }
        out
    }
}

/// Validate options against the source catalog and resolve defaults.
/// Unknown categories are set aside in `rejected`; the rest become jobs.
pub fn plan(opts: &AppOptions) -> Result<Plan, ScrapeError> {
    let spec = SourceSpec::for_kind(opts.scrape.source);
    let limit = opts.scrape.limit.unwrap_or(spec.default_limit);

    let (categories, rejected) = spec.resolve(opts.scrape.categories.as_slice());
    let jobs = categories.into_iter().map(|category| Job { category, limit }).collect();

    let out_path = resolve_out_path(opts.export.out.as_deref(), spec.default_file)
        .map_err(|source| ScrapeError::Persistence { path: PathBuf::from(spec.default_file), source })?;

    let settle = if opts.scrape.settle { spec.settle } else { SettleDelay::None };

    Ok(Plan {
        mode: opts.export.mode.unwrap_or(spec.default_mode),
        ready: opts.scrape.ready_wait(),
        spec,
        jobs,
        rejected,
        out_path,
        settle,
    })
}

/// Top-level runner: validate, start one browser, scrape every category in
/// order, persist, and close the browser no matter how the sessions went.
///
/// Unknown categories are reported and skipped. An error is returned only
/// when the browser cannot be started, the output path is unusable, or no
/// requested category was valid (then no browser is started at all).
/// Session and write failures are collected in the summary.
pub async fn run<L: Launcher>(
    opts: &AppOptions,
    launcher: &L,
    progress: &mut dyn Progress,
) -> Result<RunSummary, ScrapeError> {
    let mut plan = plan(opts)?;

    let mut rejected = std::mem::take(&mut plan.rejected);
    for e in &rejected {
        warn!("{e}");
        progress.log(&e.to_string());
    }
    if plan.jobs.is_empty() && !rejected.is_empty() {
        return Err(rejected.remove(0));
    }

    let browser = launcher.launch().await.map_err(ScrapeError::Launch)?;
    let outcome = AssertUnwindSafe(run_plan(&plan, &browser, progress)).catch_unwind().await;

    if let Err(e) = browser.close().await {
        warn!("could not close browser: {e}");
    }

    match outcome {
        Ok(mut summary) => {
            summary.rejected = rejected;
            Ok(summary)
        }
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Run every job of `plan` against an already started browser.
pub async fn run_plan<B: Browser>(plan: &Plan, browser: &B, progress: &mut dyn Progress) -> RunSummary {
    let mut summary = RunSummary {
        source: plan.spec.name,
        reports: Vec::with_capacity(plan.jobs.len()),
        writes: Vec::new(),
        write_errors: Vec::new(),
        rejected: Vec::new(),
    };

    for job in &plan.jobs {
        progress.log(&format!("\nScraping {} movies from {}...", job.category.label, plan.spec.name));

        let report = ScrapeSession::new(&plan.spec, job, plan.ready)
            .with_settle(plan.settle)
            .run(browser, progress)
            .await;

        if let Some(e) = &report.error {
            progress.log(&format!("Error scraping {}: {e}", job.category.label));
        }

        // Append grows the file one category at a time; overwrite waits for
        // the whole run so the file ends up holding exactly this run's rows.
        if plan.mode == WriteMode::Append && !report.batch.is_empty() {
            persist(&mut summary, plan, &report.batch.columns, report.batch.rows(), progress);
        }

        summary.reports.push(SourceReport {
            category: job.category.clone(),
            state: report.state,
            batch: report.batch,
            skipped: report.skipped,
            error: report.error,
        });
    }

    if plan.mode == WriteMode::Overwrite && summary.total_records() > 0 {
        let rows: Vec<Vec<String>> = summary.reports.iter().flat_map(|r| r.batch.rows()).collect();
        persist(&mut summary, plan, &plan.spec.columns(), rows, progress);
    }

    if summary.total_records() == 0 {
        progress.log("No data was collected.");
    }

    info!(
        source = plan.spec.name,
        records = summary.total_records(),
        failed = summary.failed_sessions(),
        "run finished"
    );
    summary
}

fn persist(
    summary: &mut RunSummary,
    plan: &Plan,
    columns: &[String],
    rows: Vec<Vec<String>>,
    progress: &mut dyn Progress,
) {
    match write_batch(&plan.out_path, columns, &rows, plan.mode) {
        Ok(outcome) => {
            progress.log(&format!("Data saved successfully to: {}", outcome.path.display()));
            summary.writes.push(outcome);
        }
        Err(e) => {
            warn!("{e}");
            progress.log(&format!("Could not save file: {e}"));
            summary.write_errors.push(e);
        }
    }
}
