//! Flows module - End-to-end pipelines
//!
//! Provides:
//! - snapshot: Check the root, collect, write the snapshot file, summarize

pub mod snapshot;
