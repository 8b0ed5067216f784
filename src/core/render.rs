//! Snapshot writer
//!
//! Serializes collected records into one annotated text file. Each record becomes:
//!
//! ```text
//! ===== <name> =====
//! Path: <path>
//! <content>
//!
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::core::model::{FileRecord, SnapshotError};
use crate::core::paths::normalize_path;

/// Fence around the file name in each record header
pub const HEADER_FENCE: &str = "=====";

/// Render a single record block
pub fn render_record(record: &FileRecord) -> String {
    format!(
        "{fence} {} {fence}\nPath: {}\n{}\n\n",
        record.name,
        record.path,
        record.content,
        fence = HEADER_FENCE
    )
}

/// Streams record blocks into a writer, counting bytes
pub struct Renderer<W: Write> {
    writer: W,
    bytes: u64,
}

impl<W: Write> Renderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, bytes: 0 }
    }

    /// Write one record block
    pub fn write_record(&mut self, record: &FileRecord) -> io::Result<()> {
        self.put(render_record(record).as_bytes())
    }

    /// Flush and return the number of bytes written
    pub fn finish(mut self) -> io::Result<u64> {
        self.writer.flush()?;
        Ok(self.bytes)
    }

    fn put(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.bytes += data.len() as u64;
        Ok(())
    }
}

/// Write all records, in order, to any writer
pub fn write_records<W: Write>(records: &[FileRecord], writer: W) -> io::Result<u64> {
    let mut renderer = Renderer::new(writer);
    for record in records {
        renderer.write_record(record)?;
    }
    renderer.finish()
}

/// Create (or truncate) `output` and write the snapshot into it.
///
/// There is no atomic replace: a failure part way leaves the file as the failed write left it.
pub fn write_snapshot(records: &[FileRecord], output: &Path) -> Result<u64, SnapshotError> {
    let to_error = |source: io::Error| SnapshotError::Write {
        path: normalize_path(output),
        source,
    };

    let file = File::create(output).map_err(to_error)?;
    write_records(records, BufWriter::new(file)).map_err(to_error)
}
