// src/lib.rs

#[macro_use]
pub mod macros;

pub mod browser;
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod engine;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod runner;
pub mod specs;
