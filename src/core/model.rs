//! Snapshot data model
//!
//! The collector produces a [`Collection`] of [`FileRecord`]s; the writer consumes it once and the
//! orchestration layer turns the outcome into a [`RunSummary`].

use serde::Serialize;
use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

/// One collected file: its base name, traversal path and decoded text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Base file name
    pub name: String,

    /// Path as reached by the traversal, using '/' as separator
    pub path: String,

    /// Full decoded text
    pub content: String,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A file (or directory listing) that could not be read and was left out of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

impl From<&ReadError> for SkippedFile {
    fn from(err: &ReadError) -> Self {
        Self {
            path: err.path().to_string(),
            reason: err.reason(),
        }
    }
}

/// Everything the collector gathered, in traversal order
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub records: Vec<FileRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    /// Record a recoverable failure
    pub fn skip(&mut self, err: &ReadError) {
        self.skipped.push(SkippedFile::from(err));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Machine-readable outcome of a successful run (printed with `--json`)
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub root: String,
    pub output: String,
    pub files: usize,
    pub skipped: Vec<SkippedFile>,
    pub bytes: u64,
}

/// Recoverable failure for a single file or directory listing
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    InvalidUtf8 {
        path: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Skipped {path}: not a regular file")]
    NotRegular { path: String },
}

impl ReadError {
    pub fn path(&self) -> &str {
        match self {
            ReadError::Io { path, .. }
            | ReadError::InvalidUtf8 { path, .. }
            | ReadError::NotRegular { path } => path,
        }
    }

    /// The underlying cause, without the path
    pub fn reason(&self) -> String {
        match self {
            ReadError::Io { source, .. } => source.to_string(),
            ReadError::InvalidUtf8 { source, .. } => source.to_string(),
            ReadError::NotRegular { .. } => "not a regular file".to_string(),
        }
    }
}

/// Terminal failure for a whole run
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Directory {root} does not exist")]
    RootNotFound { root: String },

    #[error("{root} is not a directory")]
    RootNotDirectory { root: String },

    #[error("Cannot access directory {root}: {source}")]
    RootUnreadable {
        root: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {path}: {reason}")]
    Config { path: String, reason: String },
}

impl SnapshotError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            SnapshotError::RootNotFound { .. }
            | SnapshotError::RootNotDirectory { .. }
            | SnapshotError::RootUnreadable { .. } => 2,
            SnapshotError::Write { .. } | SnapshotError::Config { .. } => 1,
        }
    }
}
