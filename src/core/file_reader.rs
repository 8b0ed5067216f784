//! Text file reading
//!
//! Files are decoded as strict UTF-8. Anything that fails to open, read or decode is reported as a
//! [`ReadError`] naming the file, so the caller can skip it and carry on.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::core::model::ReadError;
use crate::core::paths::normalize_path;

/// Read a whole file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String, ReadError> {
    let bytes = read_file_bytes(path).map_err(|source| ReadError::Io {
        path: normalize_path(path),
        source,
    })?;

    String::from_utf8(bytes).map_err(|source| ReadError::InvalidUtf8 {
        path: normalize_path(path),
        source,
    })
}

/// Read file bytes; the handle is closed when this returns, on success or failure
fn read_file_bytes(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let capacity = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

    let mut reader = BufReader::new(file);
    let mut buffer = Vec::with_capacity(capacity);
    reader.read_to_end(&mut buffer)?;

    Ok(buffer)
}
