// src/specs/mod.rs
//! # Source specs
//!
//! One module per website. Each spec is plain data describing *where the
//! listing lives* and *how to read one result element*: the category → URL
//! catalog, the readiness locator, the item locator, and the field specs.
//!
//! ## What does **not** live here
//! - Talking to the browser (`engine` drives a `browser::Browser`).
//! - Writing files (`file`), or deciding which categories run (`runner`).
//!
//! Selectors are copied from the live pages and are expected to break when the
//! sites change their markup; nothing here tries to be clever about that.

use crate::config::options::{SourceKind, WriteMode};
use crate::engine::types::{FieldSpec, ItemScope, Locator, SettleDelay};
use crate::error::ScrapeError;

pub mod imdb;
pub mod rotten_tomatoes;

/// One selectable category and the listing page it maps to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryEntry {
    /// What the user types, lowercase.
    pub key: &'static str,
    /// What ends up in output and progress lines.
    pub label: String,
    pub url: String,
}

/// Closed, ordered set of categories for one source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CategoryEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CategoryEntry>) -> Self { Self { entries } }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.key).collect()
    }

    pub fn entries(&self) -> &[CategoryEntry] { &self.entries }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn get(&self, name: &str) -> Option<&CategoryEntry> {
        let wanted = name.trim();
        self.entries.iter().find(|e| e.key.eq_ignore_ascii_case(wanted))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSpec {
    pub name: &'static str,
    pub catalog: Catalog,
    pub ready: Locator,
    pub items: Locator,
    pub item_scope: ItemScope,
    pub fields: Vec<FieldSpec>,
    pub settle: SettleDelay,
    pub default_limit: usize,
    pub default_mode: WriteMode,
    pub default_file: &'static str,
    pub default_categories: &'static [&'static str],
}

impl SourceSpec {
    pub fn for_kind(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Imdb => imdb::spec(),
            SourceKind::RottenTomatoes => rotten_tomatoes::spec(),
        }
    }

    pub fn columns(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.to_string()).collect()
    }

    pub fn category(&self, name: &str) -> Result<&CategoryEntry, ScrapeError> {
        self.catalog.get(name).ok_or_else(|| ScrapeError::InvalidCategory {
            source_name: self.name,
            given: name.to_string(),
            valid: self.catalog.keys(),
        })
    }

    /// Split a request into known categories and one `InvalidCategory` per
    /// unknown name, both in request order. An empty request selects the
    /// source's defaults.
    pub fn resolve<S: AsRef<str>>(&self, requested: &[S]) -> (Vec<CategoryEntry>, Vec<ScrapeError>) {
        let names: Vec<&str> = if requested.is_empty() {
            self.default_categories.to_vec()
        } else {
            requested.iter().map(|n| n.as_ref()).collect()
        };

        let mut found = Vec::new();
        let mut rejected = Vec::new();
        for name in names {
            match self.category(name) {
                Ok(entry) => found.push(entry.clone()),
                Err(e) => rejected.push(e),
            }
        }
        (found, rejected)
    }
}
