// src/specs/rotten_tomatoes.rs
//
// Rotten Tomatoes "movies at home" browse pages. Each tile yields the title;
// the category column is the selected genre, title-cased.

use super::{Catalog, CategoryEntry, SourceSpec};
use crate::config::consts::{RT_FILE, RT_LIMIT, RT_SETTLE_MAX, RT_SETTLE_MIN};
use crate::config::options::WriteMode;
use crate::core::sanitize::title_case;
use crate::engine::types::{FieldSpec, ItemScope, Locator, SettleDelay};

pub const UNKNOWN_TITLE: &str = "Unknown Title";

const BROWSE_URL: &str = "https://www.rottentomatoes.com/browse/movies_at_home";

// (key, genre path segment)
const GENRES: &[(&str, &str)] = &[
    ("action", "action"),
    ("comedy", "comedy"),
    ("drama", "drama"),
    ("horror", "horror"),
    ("romance", "romance"),
    ("sci-fi", "sci_fi"),
    ("documentary", "documentary"),
    ("animation", "animation"),
];

const TILE: Locator = Locator::Css("a.js-tile-link");

pub fn spec() -> SourceSpec {
    let entries = GENRES
        .iter()
        .map(|&(key, segment)| CategoryEntry {
            key,
            label: title_case(key),
            url: format!("{BROWSE_URL}/genres:{segment}"),
        })
        .collect();

    SourceSpec {
        name: "Rotten Tomatoes",
        catalog: Catalog::new(entries),
        ready: TILE,
        items: TILE,
        item_scope: ItemScope::Document,
        fields: vec![
            FieldSpec::child("Movie Title", Locator::Css("span.p--small")).or(UNKNOWN_TITLE),
            FieldSpec::category("Category"),
        ],
        settle: SettleDelay::Jitter { min: RT_SETTLE_MIN, max: RT_SETTLE_MAX },
        default_limit: RT_LIMIT,
        default_mode: WriteMode::Append,
        default_file: RT_FILE,
        default_categories: &["comedy", "drama"],
    }
}
