// src/csv.rs
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, WriterBuilder};

/* ---------------- Reading ---------------- */

/// First row of an existing CSV file, or `None` when the file is empty.
pub fn read_header(path: &Path) -> io::Result<Option<Vec<String>>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    match rdr.records().next() {
        Some(rec) => Ok(Some(rec?.iter().map(|s| s.trim_start_matches('\u{feff}').to_string()).collect())),
        None => Ok(None),
    }
}

/* ---------------- Writing ---------------- */

/// Write an optional header followed by `rows`. Quoting follows RFC 4180.
pub fn write_rows<W: Write>(w: W, header: Option<&[String]>, rows: &[Vec<String>]) -> io::Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(w);
    if let Some(h) = header {
        wtr.write_record(h)?;
    }
    for r in rows {
        wtr.write_record(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Stringify rows as-is, for console previews.
pub fn rows_to_string(header: Option<&[String]>, rows: &[Vec<String>]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_rows(&mut buf, header, rows);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
