//! Snapshot flow - Flatten a directory tree into one annotated text file
//!
//! Steps:
//! 1. Check that the root directory exists (nothing is written otherwise)
//! 2. Collect every non-excluded text file into memory
//! 3. Write the whole collection to the output file
//! 4. Report what was written

use std::fs;
use std::io;
use std::path::Path;

use crate::backends::collect::collect_files;
use crate::core::config::Config;
use crate::core::model::{RunSummary, SnapshotError};
use crate::core::paths::normalize_path;
use crate::core::render::write_snapshot;

/// Fail unless `root` is an existing directory
pub fn check_root(root: &Path) -> Result<(), SnapshotError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(SnapshotError::RootNotDirectory {
            root: normalize_path(root),
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(SnapshotError::RootNotFound {
                root: normalize_path(root),
            })
        }
        Err(source) => Err(SnapshotError::RootUnreadable {
            root: normalize_path(root),
            source,
        }),
    }
}

/// Run the snapshot pipeline
pub fn run_snapshot(config: &Config) -> Result<RunSummary, SnapshotError> {
    check_root(&config.root)?;

    let exclusions = config.exclusion_set();
    log::debug!(
        "Collecting {} with {} exclusion(s)",
        config.root.display(),
        exclusions.len()
    );

    let collection = collect_files(&config.root, &exclusions);
    let bytes = write_snapshot(&collection.records, &config.output)?;

    let output = normalize_path(&config.output);
    if collection.is_empty() {
        log::warn!("No files collected under {}", config.root.display());
    }
    if collection.skipped.is_empty() {
        log::info!("Wrote {} file(s) to {}", collection.len(), output);
    } else {
        log::info!(
            "Wrote {} file(s) to {} ({} skipped)",
            collection.len(),
            output,
            collection.skipped.len()
        );
    }

    Ok(RunSummary {
        root: normalize_path(&config.root),
        output,
        files: collection.len(),
        skipped: collection.skipped,
        bytes,
    })
}
