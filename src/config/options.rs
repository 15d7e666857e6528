// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use super::consts::*;
use crate::engine::types::ReadyWait;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    Imdb,
    #[default]
    RottenTomatoes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub source: SourceKind,
    /// Empty means "the source's default categories".
    pub categories: Vec<String>,
    /// `None` means "the source's default limit".
    pub limit: Option<usize>,
    pub ready_timeout: Duration,
    pub ready_poll: Duration,
    pub settle: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            categories: Vec::new(),
            limit: None,
            ready_timeout: READY_TIMEOUT,
            ready_poll: READY_POLL,
            settle: true,
        }
    }
}

impl ScrapeOptions {
    pub fn ready_wait(&self) -> ReadyWait {
        ReadyWait {
            timeout: self.ready_timeout,
            poll: self.ready_poll.max(READY_POLL),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WriteMode {
    /// Replace the file with this run's rows.
    Overwrite,
    /// Add rows to the file, writing a header only when it is new.
    Append,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    /// `None` means "the source's default mode".
    pub mode: Option<WriteMode>,
    /// File, or directory (existing, or ending in a separator) to put the
    /// source's default file name in. `None` means the working directory.
    pub out: Option<PathBuf>,
    pub preview_rows: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { mode: None, out: None, preview_rows: PREVIEW_ROWS }
    }
}
