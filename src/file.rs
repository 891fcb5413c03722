//! File loading and saving.
//!
//! Thin, stateless collaborators around the buffer engine: the loader
//! produces line byte-strings with trailing `\n` / `\r\n` stripped, the
//! writer emits each line followed by a single `\n`. An open failure on
//! load is fatal to the session; the caller reports it and exits before
//! the terminal enters raw mode.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::document::Document;

/// Errors from the file collaborators.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Read a file into ordered line byte-strings.
///
/// Line endings are normalized away: `\n` and `\r\n` both terminate a
/// line and are stripped. An empty file yields zero lines.
///
/// # Errors
///
/// Returns [`FileError::Open`] when the file cannot be read.
pub fn read_lines(path: &Path) -> Result<Vec<Vec<u8>>, FileError> {
    let bytes = fs::read(path).map_err(|source| FileError::Open {
        path: path.display().to_string(),
        source,
    })?;
    Ok(split_lines(&bytes))
}

/// Write the document's lines to `path`, each followed by `\n`.
///
/// Returns the number of lines written. The caller clears the dirty flag
/// on success.
///
/// # Errors
///
/// Returns [`FileError::Write`] when the file cannot be created or a
/// write fails.
pub fn write_lines(path: &Path, document: &Document) -> Result<usize, FileError> {
    let write_err = |source| FileError::Write {
        path: path.display().to_string(),
        source,
    };
    let file = fs::File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    let mut written = 0_usize;
    for line in document.lines() {
        out.write_all(line.as_bytes()).map_err(write_err)?;
        out.write_all(b"\n").map_err(write_err)?;
        written += 1;
    }
    out.flush().map_err(write_err)?;
    Ok(written)
}

fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<Vec<u8>> = bytes
        .split(|&b| b == b'\n')
        .map(|chunk| chunk.strip_suffix(b"\r").unwrap_or(chunk).to_vec())
        .collect();
    // A trailing newline terminates the last line rather than opening an
    // empty one.
    if bytes.ends_with(b"\n") {
        lines.pop();
    }
    lines
}
