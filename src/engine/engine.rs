// src/engine/engine.rs
use rand::Rng;
use tracing::{debug, info, warn};

use crate::browser::{Browser, Element};
use crate::core::sanitize::{normalize_ws, strip_rank_prefix};
use crate::engine::types::*;
use crate::error::{FieldError, ScrapeError};
use crate::progress::Progress;
use crate::specs::{CategoryEntry, SourceSpec};

/// One category page to scrape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub category: CategoryEntry,
    pub limit: usize,
}

/* ---------------- Field extraction ---------------- */

/// Read one field from one element.
///
/// Text is whitespace-normalized and transformed; empty text is a failure.
/// On failure the field's fallback is substituted when it has one.
pub async fn extract_field<E: Element>(
    element: &E,
    field: &FieldSpec,
    category_label: &str,
) -> Result<String, FieldError> {
    let raw = match &field.source {
        FieldSource::CategoryLabel => Ok(category_label.to_string()),
        FieldSource::Child(locator) => element
            .child_text(locator)
            .await
            .map_err(|source| FieldError::Lookup { field: s!(field.name), source }),
    };

    let value = raw.and_then(|text| {
        let clean = normalize_ws(&text);
        let clean = match field.transform {
            Transform::None => clean,
            Transform::StripRank => strip_rank_prefix(&clean),
        };
        if clean.is_empty() {
            Err(FieldError::Empty { field: s!(field.name) })
        } else {
            Ok(clean)
        }
    });

    match (value, field.fallback) {
        (Ok(v), _) => Ok(v),
        (Err(e), Some(fallback)) => {
            debug!("{e}; using fallback '{fallback}'");
            Ok(s!(fallback))
        }
        (Err(e), None) => Err(e),
    }
}

/// Read every field of one element. All fields are attempted even after a
/// failure so each one is reported; the record is only built if none failed.
pub async fn extract_record<E: Element>(
    element: &E,
    fields: &[FieldSpec],
    category_label: &str,
) -> Result<ExtractedRecord, Vec<FieldError>> {
    let mut record = ExtractedRecord::new();
    let mut errors = Vec::new();
    for field in fields {
        match extract_field(element, field, category_label).await {
            Ok(v) => record.push(field.name, v),
            Err(e) => errors.push(e),
        }
    }
    if errors.is_empty() { Ok(record) } else { Err(errors) }
}

/* ---------------- Session ---------------- */

pub struct SessionReport {
    pub state: SessionState,
    pub batch: ScrapeBatch,
    /// Elements dropped because a field without fallback failed.
    pub skipped: usize,
    pub error: Option<ScrapeError>,
}

impl SessionReport {
    pub fn succeeded(&self) -> bool { self.state == SessionState::Completed }
}

/// Scrapes one category page: load, settle, wait for the list, read up to
/// `limit` elements, keep the ones whose every field could be read.
pub struct ScrapeSession<'a> {
    spec: &'a SourceSpec,
    job: &'a Job,
    ready: ReadyWait,
    settle: SettleDelay,
    state: SessionState,
}

impl<'a> ScrapeSession<'a> {
    pub fn new(spec: &'a SourceSpec, job: &'a Job, ready: ReadyWait) -> Self {
        Self { spec, job, ready, settle: spec.settle, state: SessionState::Idle }
    }

    pub fn with_settle(mut self, settle: SettleDelay) -> Self {
        self.settle = settle;
        self
    }

    pub fn state(&self) -> SessionState { self.state }

    fn transition(&mut self, next: SessionState) {
        debug!(category = %self.job.category.key, "session {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Never fails: navigation and readiness errors end up in the report with
    /// an empty batch and `SessionState::Failed`.
    pub async fn run<B: Browser>(mut self, browser: &B, progress: &mut dyn Progress) -> SessionReport {
        let mut batch = ScrapeBatch::empty(self.spec.name, &self.job.category.label, self.spec.columns());

        match self.drive(browser, &mut batch, progress).await {
            Ok(skipped) => {
                self.transition(SessionState::Completed);
                info!(
                    source = self.spec.name,
                    category = %self.job.category.label,
                    "collected {} record(s), skipped {skipped}",
                    batch.len()
                );
                SessionReport { state: self.state, batch, skipped, error: None }
            }
            Err(e) => {
                self.transition(SessionState::Failed);
                warn!(source = self.spec.name, category = %self.job.category.label, "{e}");
                batch.records.clear();
                SessionReport { state: self.state, batch, skipped: 0, error: Some(e) }
            }
        }
    }

    async fn drive<B: Browser>(
        &mut self,
        browser: &B,
        batch: &mut ScrapeBatch,
        progress: &mut dyn Progress,
    ) -> Result<usize, ScrapeError> {
        let (spec, job) = (self.spec, self.job);
        let url = &job.category.url;

        self.transition(SessionState::PageLoading);
        browser.goto(url).await.map_err(|e| ScrapeError::Navigation {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        settle(self.settle).await;

        self.transition(SessionState::AwaitingReady);
        let container = browser
            .wait_for(&spec.ready, self.ready.timeout, self.ready.poll)
            .await
            .map_err(|e| {
                debug!("readiness wait failed: {e}");
                ScrapeError::ReadinessTimeout {
                    locator: spec.ready.to_string(),
                    timeout: self.ready.timeout,
                }
            })?;

        self.transition(SessionState::Enumerating);
        let mut elements = match spec.item_scope {
            ItemScope::ReadyContainer => container.find_all(&spec.items).await,
            ItemScope::Document => browser.find_all(&spec.items).await,
        }
        .map_err(ScrapeError::Enumeration)?;
        elements.truncate(job.limit);
        progress.begin(elements.len());

        self.transition(SessionState::PerElementExtracting);
        let mut skipped = 0;
        for (i, element) in elements.iter().enumerate() {
            let idx = i + 1;
            match extract_record(element, &spec.fields, &job.category.label).await {
                Ok(record) => {
                    progress.record_done(idx, &record);
                    batch.records.push(record);
                }
                Err(errors) => {
                    skipped += 1;
                    for e in &errors {
                        warn!(category = %job.category.label, "skipping element {idx}: {e}");
                    }
                    progress.record_skipped(idx, &errors);
                }
            }
        }
        progress.finish();
        Ok(skipped)
    }
}

async fn settle(delay: SettleDelay) {
    let wait = match delay {
        SettleDelay::None => return,
        SettleDelay::Fixed(d) => d,
        SettleDelay::Jitter { min, max } if max <= min => min,
        SettleDelay::Jitter { min, max } => rand::thread_rng().gen_range(min..=max),
    };
    debug!("settling for {wait:?}");
    tokio::time::sleep(wait).await;
}
