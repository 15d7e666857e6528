// src/progress.rs
use crate::engine::types::ExtractedRecord;
use crate::error::FieldError;

/// Lightweight progress reporting for a scrape run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once per session with the number of elements that will be read.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One element produced a complete record. `idx` is 1-based.
    fn record_done(&mut self, _idx: usize, _record: &ExtractedRecord) {}

    /// One element was dropped because of `errors`.
    fn record_skipped(&mut self, _idx: usize, _errors: &[FieldError]) {}

    /// Called at the end of a session that reached its element list.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints one line per record, e.g. `3) The Godfather`.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.done = 0;
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn record_done(&mut self, idx: usize, record: &ExtractedRecord) {
        self.done += 1;
        let title = record.values().next().unwrap_or_default();
        println!("{idx}) {title}");
    }

    fn finish(&mut self) {
        if self.total > 0 && self.done < self.total {
            println!("({} of {} elements skipped)", self.total - self.done, self.total);
        }
    }
}
