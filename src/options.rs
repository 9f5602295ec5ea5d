//! Configuration options for copy operations.
//!
//! This module provides [`CopyOptions`] for configuring copy behavior and
//! [`CopyStrategy`] for choosing how file contents are transferred.
//!
//! # Example
//!
//! ```
//! use mycp::{CopyOptions, CopyStrategy};
//!
//! let options = CopyOptions::default()
//!     .with_parallel(4)
//!     .with_strategy(CopyStrategy::Streaming)
//!     .with_max_depth(64);
//! ```

/// How the contents of a single file are moved from source to destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CopyStrategy {
    /// Read the whole file into one buffer sized from its length, then write
    /// it out (default).
    ///
    /// Simple and fast for typical files, but bounds the tool to files that
    /// fit in memory.
    #[default]
    WholeFile,
    /// Copy through a fixed-size buffer in a loop.
    ///
    /// Memory use is constant regardless of file size.
    Streaming,
}

/// Options for copy operations.
///
/// Use [`Default::default()`] to get the reference behavior, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `parallel` | 1 | Sequential copy |
/// | `strategy` | `WholeFile` | One buffer per file |
/// | `file_mode` | `0o600` | Mode of created files (Unix) |
/// | `dir_mode` | `0o700` | Mode of created directories (Unix) |
/// | `sort_entries` | `true` | Copy directory entries in name order |
/// | `create_wildcard_destination` | `true` | Create the wildcard target directory |
/// | `max_depth` | `None` | No depth limit |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Number of files copied concurrently within one directory (default: 1)
    ///
    /// With 1 every copy runs on the calling thread, in listing order.
    pub parallel: usize,

    /// How file contents are transferred
    pub strategy: CopyStrategy,

    /// Permission bits for files created by the copier (default: `0o600`)
    ///
    /// Only applied when the destination file is created; the source mode
    /// is never consulted. Ignored on non-Unix platforms.
    pub file_mode: u32,

    /// Permission bits for directories created by the copier (default: `0o700`)
    pub dir_mode: u32,

    /// Sort directory entries by name before copying (default: true)
    ///
    /// When false, entries are copied in whatever order the platform's
    /// directory listing yields.
    pub sort_entries: bool,

    /// Create the destination directory of a wildcard copy if missing
    /// (default: true)
    pub create_wildcard_destination: bool,

    /// Maximum directory depth to traverse (default: None = unlimited)
    pub max_depth: Option<usize>,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,

    /// Callback for per-entry progress messages (optional)
    ///
    /// If not set and `tracing` feature is enabled, messages are logged at
    /// debug level via tracing.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub verbose_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            parallel: 1,
            strategy: CopyStrategy::WholeFile,
            file_mode: 0o600,
            dir_mode: 0o700,
            sort_entries: true,
            create_wildcard_destination: true,
            max_depth: None,
            warn_handler: None,
            verbose_handler: None,
        }
    }
}

impl CopyOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Create options with a handler for per-entry messages
    #[must_use]
    pub fn with_verbose_handler(mut self, handler: fn(&str)) -> Self {
        self.verbose_handler = Some(handler);
        self
    }

    /// Set the number of files copied concurrently
    ///
    /// Value is clamped to at least 1.
    #[must_use]
    pub fn with_parallel(mut self, n: usize) -> Self {
        self.parallel = n.max(1);
        self
    }

    /// Set the content transfer strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: CopyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the mode used for created files
    #[must_use]
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    /// Set the mode used for created directories
    #[must_use]
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    /// Copy entries in listing order instead of sorting them by name
    #[must_use]
    pub fn without_sorting(mut self) -> Self {
        self.sort_entries = false;
        self
    }

    /// Leave a missing wildcard destination alone; every copy into it fails
    #[must_use]
    pub fn without_wildcard_destination_creation(mut self) -> Self {
        self.create_wildcard_destination = false;
        self
    }

    /// Set maximum directory depth
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }

    pub(crate) fn verbose(&self, msg: &str) {
        if let Some(handler) = self.verbose_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("{}", msg);
        }
    }
}
