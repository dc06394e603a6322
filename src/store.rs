//! Plain-text persistence for documents.
//!
//! A document is stored as one line per document line, each terminated by
//! `\n`, with nothing before or after. Loading splits on `\n` only, so a
//! `\r` inside a line survives a save/load round trip untouched. Files that
//! are not valid UTF-8 still load, with the bad bytes replaced.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading or saving a document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File {} does not exist!", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Read `path` into its lines, with line terminators removed.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if the file does not exist, or
/// [`StoreError::Read`] for any other I/O failure.
pub fn load_lines(path: &Path) -> Result<Vec<String>, StoreError> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound(path.to_path_buf())
        } else {
            warn!(path = %path.display(), error = %source, "read failed");
            StoreError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let content = String::from_utf8_lossy(&bytes);
    if matches!(content, Cow::Owned(_)) {
        warn!(path = %path.display(), "file is not valid UTF-8; invalid bytes replaced");
    }
    let lines = split_lines(&content);
    info!(path = %path.display(), lines = lines.len(), "document loaded");
    Ok(lines)
}

/// Write `lines` to `path`, returning the number of bytes written.
///
/// # Errors
///
/// Returns [`StoreError::Write`] if the file cannot be created or written.
pub fn save_lines(path: &Path, lines: &[String]) -> Result<usize, StoreError> {
    let write_err = |source: io::Error| {
        warn!(path = %path.display(), error = %source, "write failed");
        StoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    };
    let text = join_lines(lines);
    let mut file = fs::File::create(path).map_err(write_err)?;
    file.write_all(text.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    info!(path = %path.display(), bytes = text.len(), "document saved");
    Ok(text.len())
}

fn split_lines(content: &str) -> Vec<String> {
    let body = content.strip_suffix('\n').unwrap_or(content);
    if content.is_empty() {
        return Vec::new();
    }
    body.split('\n').map(ToOwned::to_owned).collect()
}

fn join_lines(lines: &[String]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}
