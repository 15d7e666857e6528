// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::config::options::WriteMode;
use crate::csv::{read_header, write_rows};
use crate::error::ScrapeError;

/// What a call to [`write_batch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub rows_written: usize,
    pub header_written: bool,
}

/// Persist `rows` (already in `columns` order) to `path`.
///
/// - `Overwrite`: header and rows go through one freshly created file.
/// - `Append`: a missing or empty file gets a header first; otherwise the
///   existing header must equal `columns` or nothing is written. A last row
///   without a line break is terminated before the new rows go in.
pub fn write_batch(
    path: &Path,
    columns: &[String],
    rows: &[Vec<String>],
    mode: WriteMode,
) -> Result<WriteOutcome, ScrapeError> {
    let io_err = |source: io::Error| ScrapeError::Persistence { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent).map_err(io_err)?;
        }
    }

    let header_written = match mode {
        WriteMode::Overwrite => {
            write_new(path, columns, rows).map_err(io_err)?;
            true
        }
        WriteMode::Append => match existing_header(path).map_err(io_err)? {
            None => {
                write_new(path, columns, rows).map_err(io_err)?;
                true
            }
            Some(found) if found == columns => {
                append_rows(path, rows).map_err(io_err)?;
                false
            }
            Some(found) => {
                return Err(ScrapeError::SchemaMismatch {
                    path: path.to_path_buf(),
                    expected: columns.to_vec(),
                    found,
                });
            }
        },
    };

    debug!(path = %path.display(), rows = rows.len(), header_written, "batch written");

    Ok(WriteOutcome { path: path.to_path_buf(), rows_written: rows.len(), header_written })
}

fn existing_header(path: &Path) -> io::Result<Option<Vec<String>>> {
    match read_header(path) {
        Ok(h) => Ok(h),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Create/truncate the file and write header plus rows in one go.
pub fn write_new(path: &Path, header: &[String], rows: &[Vec<String>]) -> io::Result<()> {
    let file = File::create(path)?;
    write_rows(BufWriter::new(file), Some(header), rows)
}

/// Append rows to an existing, non-empty file.
pub fn append_rows(path: &Path, rows: &[Vec<String>]) -> io::Result<()> {
    let needs_break = !ends_with_newline(path)?;
    let mut out = BufWriter::new(OpenOptions::new().append(true).open(path)?);
    if needs_break {
        out.write_all(b"\n")?;
    }
    write_rows(out, None, rows)
}

fn ends_with_newline(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Where to write: `out` as a file, `out/<default_filename>` when `out` is a
/// directory (existing, or spelled with a trailing separator), or
/// `<cwd>/<default_filename>` when no path was given.
pub fn resolve_out_path(out: Option<&Path>, default_filename: &str) -> io::Result<PathBuf> {
    let Some(out) = out else {
        return Ok(std::env::current_dir()?.join(default_filename));
    };
    let p = PathBuf::from(normalize_separators(&out.to_string_lossy()));
    if looks_like_dir_hint(&p) || p.is_dir() {
        Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

/// Windows accepts both separators; elsewhere a backslash is an ordinary
/// file name character and is left alone.
pub fn normalize_separators(p: &str) -> String {
    if cfg!(windows) { p.replace('/', "\\") } else { p.to_string() }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    p.to_string_lossy().chars().last().is_some_and(std::path::is_separator)
}
