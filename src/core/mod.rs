//! Core module - Data model, paths, reading, writing and configuration
//!
//! This module provides:
//! - The snapshot data model and error types
//! - Path normalization and exclusion matching
//! - Strict UTF-8 file reading
//! - The snapshot writer
//! - Run configuration and logging setup

pub mod config;
pub mod file_reader;
pub mod logger;
pub mod model;
pub mod paths;
pub mod render;
