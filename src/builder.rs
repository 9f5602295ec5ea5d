//! Builder API and command dispatch.
//!
//! [`CopyBuilder`] is the single entry point the command line uses: it
//! decides between a single file copy, a recursive tree copy and a wildcard
//! copy, performs the guard-rail checks, and returns a typed error instead
//! of terminating.
//!
//! # Examples
//!
//! ## Single File
//!
//! ```no_run
//! use mycp::CopyBuilder;
//!
//! let stats = CopyBuilder::new("notes.txt", "backup/notes.txt").run()?;
//! println!("Copied {} bytes", stats.bytes_copied);
//! # Ok::<(), mycp::Error>(())
//! ```
//!
//! ## Directory Tree
//!
//! ```no_run
//! use mycp::CopyBuilder;
//!
//! let stats = CopyBuilder::new("project", "backup/project")
//!     .recursive(true)
//!     .run()?;
//! println!("Copied {} files in {} dirs", stats.files_copied, stats.dirs_created);
//! # Ok::<(), mycp::Error>(())
//! ```
//!
//! ## Wildcard
//!
//! ```no_run
//! use mycp::CopyBuilder;
//!
//! // A `*` in the source selects wildcard mode
//! let stats = CopyBuilder::new("logs/*.log", "archive").run()?;
//! # Ok::<(), mycp::Error>(())
//! ```

use crate::classify::{PathKind, classify};
use crate::copy::{CopyStats, copy_dir, copy_file, copy_wildcard};
use crate::error::{Error, Result};
use crate::options::{CopyOptions, CopyStrategy};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Which copy a [`CopyBuilder`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Copy one file; a directory source is rejected
    File,
    /// Mirror a directory tree; a non-directory source is rejected
    Recursive,
    /// Copy the entries matching a wildcard into a directory
    Wildcard,
}

impl CopyMode {
    /// Pick the mode for a source.
    ///
    /// Recursive copies take the source literally. Otherwise a source
    /// containing `*` is a wildcard pattern.
    #[must_use]
    pub fn detect(src: &Path, recursive: bool) -> Self {
        if recursive {
            Self::Recursive
        } else if src.as_os_str().as_encoded_bytes().contains(&b'*') {
            Self::Wildcard
        } else {
            Self::File
        }
    }
}

/// A builder for configuring and executing copy operations.
///
/// # Example
///
/// ```no_run
/// use mycp::CopyBuilder;
///
/// let stats = CopyBuilder::new("/data/project", "/backup/project")
///     .recursive(true)
///     .parallel(4)
///     .run()?;
/// # Ok::<(), mycp::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    recursive: bool,
    options: CopyOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (sequential, whole-file reads, `0o600` files).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            recursive: false,
            options: CopyOptions::default(),
        }
    }

    /// Copy a directory tree (`-r`).
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set the number of files copied concurrently.
    ///
    /// Default is 1 (sequential).
    #[must_use]
    pub fn parallel(mut self, threads: usize) -> Self {
        self.options = self.options.with_parallel(threads);
        self
    }

    /// Copy file contents through a fixed-size buffer instead of reading
    /// each file into memory at once.
    #[must_use]
    pub fn streaming(mut self) -> Self {
        self.options = self.options.with_strategy(CopyStrategy::Streaming);
        self
    }

    /// Keep the platform's directory listing order instead of sorting.
    #[must_use]
    pub fn unsorted(mut self) -> Self {
        self.options = self.options.without_sorting();
        self
    }

    /// Limit the maximum directory depth to traverse.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options = self.options.with_max_depth(depth);
        self
    }

    /// Set a warning handler for non-fatal issues.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Enable verbose output for detailed file operation information.
    ///
    /// The handler is called once per created directory and copied file.
    #[must_use]
    pub fn verbose(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_verbose_handler(handler);
        self
    }

    /// Replace the options wholesale.
    #[must_use]
    pub fn with_options(mut self, options: CopyOptions) -> Self {
        self.options = options;
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// The mode [`run`](Self::run) will use.
    pub fn mode(&self) -> CopyMode {
        CopyMode::detect(&self.src, self.recursive)
    }

    /// Execute the copy operation.
    ///
    /// | Mode | Source is a directory | Source is a file | Source missing |
    /// |------|-----------------------|------------------|----------------|
    /// | [`CopyMode::Recursive`] | [`copy_dir`] | [`Error::NotADirectory`] | [`Error::SourceNotFound`] |
    /// | [`CopyMode::File`] | [`Error::IsADirectory`] | [`copy_file`] | [`Error::SourceNotFound`] |
    /// | [`CopyMode::Wildcard`] | [`copy_wildcard`] | | |
    ///
    /// The rejections happen before anything is written.
    ///
    /// # Errors
    ///
    /// Returns the first error of the selected operation.
    pub fn run(self) -> Result<CopyStats> {
        match self.mode() {
            CopyMode::Recursive => copy_dir(&self.src, &self.dst, &self.options),
            CopyMode::Wildcard => {
                copy_wildcard(&self.src.to_string_lossy(), &self.dst, &self.options)
            }
            CopyMode::File => match classify(&self.src)? {
                PathKind::Directory => Err(Error::IsADirectory(self.src)),
                PathKind::NotFound => Err(Error::SourceNotFound(self.src)),
                PathKind::File => {
                    let start = Instant::now();
                    let bytes = copy_file(&self.src, &self.dst, &self.options)?;
                    Ok(CopyStats {
                        files_copied: 1,
                        dirs_created: 0,
                        bytes_copied: bytes,
                        duration: start.elapsed(),
                    })
                }
            },
        }
    }
}
