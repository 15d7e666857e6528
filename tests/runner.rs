// tests/runner.rs
mod common;

use std::fs;
use std::path::Path;
use std::time::Duration;

use common::*;
use movie_scrape::config::options::{AppOptions, SourceKind, WriteMode};
use movie_scrape::engine::types::SessionState;
use movie_scrape::error::ScrapeError;
use movie_scrape::progress::{NullProgress, Progress};
use movie_scrape::runner;
use movie_scrape::specs::SourceSpec;

fn opts(source: SourceKind, categories: &[&str], out: &Path) -> AppOptions {
    let mut o = AppOptions::default();
    o.scrape.source = source;
    o.scrape.categories = categories.iter().map(|c| c.to_string()).collect();
    o.scrape.settle = false;
    o.scrape.ready_timeout = Duration::from_secs(2);
    o.export.out = Some(out.to_path_buf());
    o
}

#[derive(Default)]
struct LogRecorder {
    lines: Vec<String>,
}

impl Progress for LogRecorder {
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
}

fn url(source: SourceKind, category: &str) -> String {
    SourceSpec::for_kind(source).category(category).unwrap().url.clone()
}

#[tokio::test]
async fn unknown_category_is_reported_and_the_rest_still_run() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("movies_dataset.csv");
    let rt = SourceKind::RottenTomatoes;
    let browser = FakeBrowser::new().page(&url(rt, "comedy"), rt_page(vec![rt_tile(Some("Airplane!"))]));
    let launcher = FakeLauncher::new(browser.clone());
    let mut progress = LogRecorder::default();

    let summary = runner::run(&opts(rt, &["comedy", "musicals"], &out), &launcher, &mut progress)
        .await
        .unwrap();

    assert_eq!(launcher.launches(), 1);
    assert_eq!(browser.visited(), vec![url(rt, "comedy")]);
    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.total_records(), 1);
    assert_eq!(fs::read_to_string(&out).unwrap(), "Movie Title,Category\nAirplane!,Comedy\n");

    assert_eq!(summary.rejected.len(), 1);
    match &summary.rejected[0] {
        ScrapeError::InvalidCategory { given, valid, .. } => {
            assert_eq!(given, "musicals");
            assert!(valid.contains(&"sci-fi"));
        }
        other => panic!("expected invalid category, got {other:?}"),
    }
    assert!(progress.lines.iter().any(|l| l.contains("musicals") && l.contains("comedy, drama")));
}

#[tokio::test]
async fn no_valid_category_means_no_browser() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = FakeLauncher::new(FakeBrowser::new());
    let o = opts(SourceKind::RottenTomatoes, &["musicals", "westerns"], &dir.path().join("out.csv"));
    let mut progress = LogRecorder::default();

    let err = runner::run(&o, &launcher, &mut progress).await.err().unwrap();

    assert!(matches!(err, ScrapeError::InvalidCategory { ref given, .. } if given == "musicals"));
    assert!(!err.is_fatal());
    assert!(progress.lines.iter().any(|l| l.contains("westerns")));
    assert_eq!(launcher.launches(), 0);
    assert!(!dir.path().join("out.csv").exists());
}

#[tokio::test]
async fn launch_failure_is_returned_and_nothing_written() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let launcher = FakeLauncher::failing();

    let err = runner::run(&opts(SourceKind::Imdb, &[], &out), &launcher, &mut NullProgress)
        .await
        .err()
        .unwrap();

    assert!(matches!(err, ScrapeError::Launch(_)));
    assert!(err.is_fatal());
    assert_eq!(launcher.launches(), 1);
    assert!(!out.exists());
}

#[tokio::test]
async fn default_categories_append_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("movies_dataset.csv");
    let rt = SourceKind::RottenTomatoes;
    let browser = FakeBrowser::new()
        .page(&url(rt, "comedy"), rt_page(vec![rt_tile(Some("Airplane!")), rt_tile(None)]))
        .page(&url(rt, "drama"), rt_page(vec![rt_tile(Some("Heat"))]));
    let launcher = FakeLauncher::new(browser.clone());

    let summary = runner::run(&opts(rt, &[], &out), &launcher, &mut NullProgress).await.unwrap();

    assert_eq!(summary.total_records(), 3);
    assert_eq!(summary.writes.len(), 2);
    assert_eq!(summary.files_written(), vec![out.clone()]);
    assert_eq!(browser.visited(), vec![url(rt, "comedy"), url(rt, "drama")]);
    assert_eq!(browser.times_closed(), 1);
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Movie Title,Category\nAirplane!,Comedy\nUnknown Title,Comedy\nHeat,Drama\n"
    );
}

#[tokio::test]
async fn append_run_adds_to_earlier_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("movies_dataset.csv");
    fs::write(&out, "Movie Title,Category\nUp,Animation\n").unwrap();
    let rt = SourceKind::RottenTomatoes;
    let browser = FakeBrowser::new().page(&url(rt, "horror"), rt_page(vec![rt_tile(Some("Alien"))]));

    runner::run(&opts(rt, &["horror"], &out), &FakeLauncher::new(browser), &mut NullProgress)
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Movie Title,Category\nUp,Animation\nAlien,Horror\n"
    );
}

#[tokio::test(start_paused = true)]
async fn timeout_in_one_category_does_not_stop_the_next() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("movies_dataset.csv");
    let rt = SourceKind::RottenTomatoes;
    let browser = FakeBrowser::new()
        .page(&url(rt, "action"), FakePage::NeverReady)
        .page(&url(rt, "romance"), rt_page(vec![rt_tile(Some("Casablanca"))]));
    let launcher = FakeLauncher::new(browser.clone());

    let summary = runner::run(&opts(rt, &["action", "romance"], &out), &launcher, &mut NullProgress)
        .await
        .unwrap();

    assert_eq!(summary.failed_sessions(), 1);
    assert_eq!(summary.reports[0].state, SessionState::Failed);
    assert!(matches!(summary.reports[0].error, Some(ScrapeError::ReadinessTimeout { .. })));
    assert!(summary.reports[0].batch.is_empty());
    assert_eq!(summary.reports[1].state, SessionState::Completed);
    assert_eq!(summary.total_records(), 1);
    assert_eq!(browser.times_closed(), 1);
    assert_eq!(fs::read_to_string(&out).unwrap(), "Movie Title,Category\nCasablanca,Romance\n");
}

#[tokio::test]
async fn overwrite_replaces_file_with_this_runs_rows() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("movie_data_by_genre.csv");
    fs::write(&out, "Movie,Year,Duration\nOld,1900,1h\n").unwrap();
    let browser = FakeBrowser::new()
        .page(&url(SourceKind::Imdb, "comedy"), imdb_page(vec![imdb_item("1. Clue", "1985", Some("1h 34m"))]))
        .page(&url(SourceKind::Imdb, "war"), imdb_page(vec![imdb_item("1. Ran", "1985", Some("2h 42m"))]));

    let o = opts(SourceKind::Imdb, &["comedy", "war"], &out);
    let summary = runner::run(&o, &FakeLauncher::new(browser), &mut NullProgress).await.unwrap();

    assert_eq!(summary.writes.len(), 1);
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Movie,Year,Duration\nClue,1985,1h 34m\nRan,1985,2h 42m\n"
    );
}

#[tokio::test]
async fn explicit_limit_and_mode_override_source_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("movie_data_by_genre.csv");
    let browser = FakeBrowser::new().page(&url(SourceKind::Imdb, "crime"), imdb_page(numbered_imdb_items(8)));

    let mut o = opts(SourceKind::Imdb, &["crime"], &out);
    o.scrape.limit = Some(2);
    o.export.mode = Some(WriteMode::Append);
    runner::run(&o, &FakeLauncher::new(browser.clone()), &mut NullProgress).await.unwrap();
    runner::run(&o, &FakeLauncher::new(browser), &mut NullProgress).await.unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 1 + 2 + 2);
}

#[tokio::test]
async fn nothing_collected_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("movie_data_by_genre.csv");
    let browser = FakeBrowser::new().page(&url(SourceKind::Imdb, "comedy"), FakePage::Unreachable);

    let summary = runner::run(&opts(SourceKind::Imdb, &["comedy"], &out), &FakeLauncher::new(browser.clone()), &mut NullProgress)
        .await
        .unwrap();

    assert_eq!(summary.total_records(), 0);
    assert!(summary.writes.is_empty());
    assert!(!out.exists());
    assert_eq!(browser.times_closed(), 1);
}

#[tokio::test]
async fn schema_mismatch_keeps_the_batch_in_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("shared.csv");
    fs::write(&out, "Movie,Year,Duration\nHeat,1995,2h 50m\n").unwrap();
    let rt = SourceKind::RottenTomatoes;
    let browser = FakeBrowser::new().page(&url(rt, "documentary"), rt_page(vec![rt_tile(Some("Koyaanisqatsi"))]));

    let summary = runner::run(&opts(rt, &["documentary"], &out), &FakeLauncher::new(browser), &mut NullProgress)
        .await
        .unwrap();

    assert_eq!(summary.write_errors.len(), 1);
    assert!(matches!(summary.write_errors[0], ScrapeError::SchemaMismatch { .. }));
    assert_eq!(summary.reports[0].batch.rows(), vec![vec!["Koyaanisqatsi", "Documentary"]]);
    assert_eq!(fs::read_to_string(&out).unwrap(), "Movie,Year,Duration\nHeat,1995,2h 50m\n");
}

#[test]
fn plan_resolves_source_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let plan = runner::plan(&opts(SourceKind::Imdb, &[], dir.path())).unwrap();

    assert_eq!(plan.mode, WriteMode::Overwrite);
    assert_eq!(plan.jobs.len(), 1);
    assert_eq!(plan.jobs[0].category.key, "comedy");
    assert_eq!(plan.jobs[0].limit, 50);
    assert!(plan.rejected.is_empty());
    assert_eq!(plan.out_path, dir.path().join("movie_data_by_genre.csv"));
}
