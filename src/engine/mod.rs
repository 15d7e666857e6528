// src/engine/mod.rs
mod engine;
pub mod types;

pub use engine::{extract_field, extract_record, Job, ScrapeSession, SessionReport};
