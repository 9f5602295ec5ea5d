//! # mycp
//!
//! Copy a file, a directory tree, or the files matching a wildcard pattern.
//!
//! ## Core Features
//!
//! - **Single file copy**: whole-content transfer, destination created or
//!   truncated with a fixed owner-only mode (`0o600`)
//! - **Recursive copy**: mirrors a directory tree, creating destination
//!   directories (`0o700`) before anything is written into them
//! - **Wildcard copy**: `dir/*.txt` copies every matching entry of `dir`
//!   into a destination directory
//! - **Typed errors**: every failure surfaces as an [`Error`] carrying the
//!   path and the operating system's description; nothing exits the process
//! - **Deterministic order**: directory entries are copied in name order
//! - **Optional worker pool**: files of a directory can be copied concurrently
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use mycp::CopyBuilder;
//!
//! // File, tree or wildcard, picked from the source and the recursive flag
//! let stats = CopyBuilder::new("src", "dst").recursive(true).run()?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//! # Ok::<(), mycp::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use mycp::{copy_dir, copy_file, copy_wildcard, CopyOptions};
//! use std::path::Path;
//!
//! let options = CopyOptions::default().with_parallel(4);
//!
//! copy_file(Path::new("a.txt"), Path::new("b.txt"), &options)?;
//! copy_dir(Path::new("project"), Path::new("backup"), &options)?;
//! copy_wildcard("logs/*.log", Path::new("archive"), &options)?;
//! # Ok::<(), mycp::Error>(())
//! ```
//!
//! ## Failure Model
//!
//! The first failure stops the operation and is returned. Files already
//! written stay on disk; there is no rollback.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod classify;
mod copy;
mod error;
mod options;

pub use builder::{CopyBuilder, CopyMode};
pub use classify::{PathKind, classify};
pub use copy::{CopyStats, copy_dir, copy_file, copy_wildcard, split_pattern};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::{CopyOptions, CopyStrategy};
