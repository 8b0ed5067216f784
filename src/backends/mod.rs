//! Backends module - File system traversal
//!
//! Provides:
//! - collect: Top-down directory walk with exclusion pruning

pub mod collect;
