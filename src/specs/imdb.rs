// src/specs/imdb.rs
//
// IMDb advanced title search, one genre at a time, best rated first.
// Each <li> of the result list yields: Movie, Year, Duration.
// Titles come back ranked ("12. Heat"); the rank is stripped.

use super::{Catalog, CategoryEntry, SourceSpec};
use crate::config::consts::{IMDB_FILE, IMDB_LIMIT, IMDB_SETTLE};
use crate::config::options::WriteMode;
use crate::engine::types::{FieldSpec, ItemScope, Locator, SettleDelay};

const SEARCH_URL: &str = "https://www.imdb.com/search/title/";

const RESULT_LIST: &str = "//*[@id=\"__next\"]/main/div[2]/div[3]/section/section/div/section/section/div[2]/div/section/div[2]/div[2]/ul";

// (key, IMDb genre parameter)
const GENRES: &[(&str, &str)] = &[
    ("action", "Action"),
    ("adventure", "Adventure"),
    ("animation", "Animation"),
    ("biography", "Biography"),
    ("comedy", "Comedy"),
    ("crime", "Crime"),
    ("documentary", "Documentary"),
    ("drama", "Drama"),
    ("family", "Family"),
    ("fantasy", "Fantasy"),
    ("film-noir", "Film-Noir"),
    ("history", "History"),
    ("horror", "Horror"),
    ("music", "Music"),
    ("musical", "Musical"),
    ("mystery", "Mystery"),
    ("romance", "Romance"),
    ("sci-fi", "Sci-Fi"),
    ("sport", "Sport"),
    ("thriller", "Thriller"),
    ("war", "War"),
    ("western", "Western"),
];

pub fn genre_url(genre: &str) -> String {
    format!("{SEARCH_URL}?genres={genre}&sort=user_rating,desc&title_type=feature")
}

pub fn spec() -> SourceSpec {
    let entries = GENRES
        .iter()
        .map(|&(key, genre)| CategoryEntry { key, label: genre.to_string(), url: genre_url(genre) })
        .collect();

    SourceSpec {
        name: "IMDb",
        catalog: Catalog::new(entries),
        ready: Locator::XPath(RESULT_LIST),
        items: Locator::Tag("li"),
        item_scope: ItemScope::ReadyContainer,
        fields: vec![
            FieldSpec::child("Movie", Locator::Css("h3.ipc-title__text")).strip_rank(),
            FieldSpec::child("Year", Locator::Css("span.dli-title-metadata-item:nth-child(1)")),
            FieldSpec::child("Duration", Locator::Css("span.dli-title-metadata-item:nth-child(2)")),
        ],
        settle: SettleDelay::Fixed(IMDB_SETTLE),
        default_limit: IMDB_LIMIT,
        default_mode: WriteMode::Overwrite,
        default_file: IMDB_FILE,
        default_categories: &["comedy"],
    }
}
