//! File I/O primitives with consistent error handling.
//!
//! Files are handled as line buffers: each element keeps its own line
//! terminator, so writing a buffer back is plain concatenation.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::path::Path;

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::internal_io(
            format!("{}: {}", path.display(), e),
            Some(operation.to_string()),
        )
    })
}

/// Read a file into a line buffer, keeping `\n` (and `\r\n`) on every line.
///
/// A final line without a terminator is kept as-is.
pub fn read_lines(path: &Path, operation: &str) -> Result<Vec<String>> {
    Ok(split_lines(&read_file(path, operation)?))
}

pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(String::from).collect()
}

/// Overwrite a file in place with the concatenated lines.
///
/// Truncates and rewrites the target directly; there is no temp file or rename.
pub fn write_lines(path: &Path, lines: &[String], operation: &str) -> Result<()> {
    fs::write(path, lines.concat()).map_err(|e| {
        Error::internal_io(
            format!("{}: {}", path.display(), e),
            Some(operation.to_string()),
        )
    })
}

/// Check that a file can be opened for reading. The handle is dropped immediately.
pub fn check_readable(path: &Path) -> std::io::Result<()> {
    File::open(path).map(|_| ())
}
