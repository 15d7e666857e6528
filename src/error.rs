// src/error.rs
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures reported by a browser backend. Backends map their own error
/// types into these so the engine never sees driver-specific errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrowserError {
    #[error("could not start browser session: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("no element matches {0}")]
    NotFound(String),

    #[error("driver error: {0}")]
    Driver(String),
}

/// Why a single field on a single element could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field '{field}': {source}")]
    Lookup { field: String, source: BrowserError },

    #[error("field '{field}' is empty")]
    Empty { field: String },
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("unknown category '{given}' for {source_name}; valid options: {}", valid.join(", "))]
    InvalidCategory {
        source_name: &'static str,
        given: String,
        valid: Vec<&'static str>,
    },

    #[error("browser unavailable: {0}")]
    Launch(BrowserError),

    #[error("could not load {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("'{locator}' did not appear within {timeout:?}")]
    ReadinessTimeout { locator: String, timeout: Duration },

    #[error("could not enumerate results: {0}")]
    Enumeration(BrowserError),

    #[error("could not write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{} has columns [{}] but the batch has [{}]; refusing to append",
        path.display(), found.join(", "), expected.join(", ")
    )]
    SchemaMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl ScrapeError {
    /// Errors that stop the whole run rather than one category.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScrapeError::Launch(_))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
