//! Core copy operations.
//!
//! This module provides the single file copier, the recursive tree walker
//! and the wildcard resolver. All of them are sequential by default and
//! return a typed error on the first failure.

mod dir;
mod file;
mod utils;
mod wildcard;

// Re-export public API
pub use dir::{CopyStats, copy_dir};
pub use file::copy_file;
pub use wildcard::{copy_wildcard, split_pattern};
