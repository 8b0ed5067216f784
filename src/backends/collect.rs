//! Collector backend
//!
//! Walks a directory tree top-down. At each level the entries are listed once in file-system order,
//! excluded subdirectories are pruned before descent, the level's files are read, and then the
//! surviving subdirectories are visited in order.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::file_reader::read_text;
use crate::core::model::{Collection, FileRecord, ReadError};
use crate::core::paths::{normalize_path, prune_dirs, ExclusionSet};

/// Entries directly inside one directory
#[derive(Debug, Default)]
struct Level {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
    /// FIFOs, sockets, devices and dangling links; opening them could block forever
    special: Vec<PathBuf>,
    errors: Vec<ReadError>,
}

/// List the immediate children of `dir`, unsorted. Symlinks are not followed.
fn list_level(dir: &Path) -> Level {
    let mut level = Level::default();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                level.errors.push(walk_error(dir, err));
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            level.dirs.push(entry.into_path());
        } else if file_type.is_file() {
            level.files.push(entry.into_path());
        } else if file_type.is_symlink() && entry.path().is_dir() {
            log::debug!("Not following symlinked directory {}", entry.path().display());
        } else if file_type.is_symlink() && entry.path().is_file() {
            level.files.push(entry.into_path());
        } else {
            level.special.push(entry.into_path());
        }
    }

    level
}

fn walk_error(dir: &Path, err: walkdir::Error) -> ReadError {
    let path = normalize_path(err.path().unwrap_or(dir));
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("directory cycle detected"));
    ReadError::Io { path, source }
}

/// Collect every readable, non-excluded file under `root`.
///
/// Per-file failures are logged and recorded in [`Collection::skipped`]; they never stop the walk.
/// The root itself is assumed to exist and is never matched against the exclusions.
pub fn collect_files(root: &Path, exclusions: &ExclusionSet) -> Collection {
    let mut collection = Collection::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let level = list_level(&dir);

        for err in &level.errors {
            log::warn!("{}", err);
            collection.skip(err);
        }

        let subdirs = prune_dirs(level.dirs, |sub| {
            let excluded = exclusions.contains(sub);
            if excluded {
                log::debug!("Pruned {}", sub.display());
            }
            excluded
        });

        for path in level.files {
            if exclusions.contains(&path) {
                log::debug!("Excluded {}", path.display());
                continue;
            }
            collect_file(&path, &mut collection);
        }

        for path in level.special {
            if exclusions.contains(&path) {
                log::debug!("Excluded {}", path.display());
                continue;
            }
            let err = ReadError::NotRegular {
                path: normalize_path(&path),
            };
            log::warn!("{}", err);
            collection.skip(&err);
        }

        // Reversed so the first sibling is popped (and fully walked) first
        pending.extend(subdirs.into_iter().rev());
    }

    collection
}

fn collect_file(path: &Path, collection: &mut Collection) {
    match read_text(path) {
        Ok(content) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            log::debug!("Collected {}", path.display());
            collection.push(FileRecord::new(name, normalize_path(path), content));
        }
        Err(err) => {
            log::warn!("{}", err);
            collection.skip(&err);
        }
    }
}
