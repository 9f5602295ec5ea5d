//! Error types for mycp.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during copy operations, the [`Result`] type alias, and
//! [`ErrorCode`], a stable machine-readable classification of errors.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Validation | [`Error::SourceNotFound`], [`Error::NotADirectory`], [`Error::IsADirectory`], [`Error::InvalidPattern`], [`Error::DestinationInsideSource`] |
//! | Access | [`Error::PermissionDenied`], [`Error::Classify`] |
//! | File IO | [`Error::SourceOpen`], [`Error::Read`], [`Error::DestinationOpen`], [`Error::Write`] |
//! | Directory IO | [`Error::SourceDir`], [`Error::DirectoryCreate`] |
//! | Safety | [`Error::SymlinkLoop`], [`Error::MaxDepthExceeded`] |

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for mycp operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use mycp::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Errors that can occur during copy operations.
///
/// All errors include the path involved, and every variant that wraps an
/// operating system failure keeps the underlying [`io::Error`] as its
/// source so the system's description reaches the user.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Source path does not exist
    #[error("Source path does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// Access to a path was denied while querying its status
    #[error("Permission denied: {path}: {source}")]
    PermissionDenied {
        /// Path whose status could not be read
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Querying the status of a path failed for a reason other than
    /// absence or permissions
    #[error("Failed to stat {path}: {source}")]
    Classify {
        /// Path being classified
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// `-r` given, but the source is not a directory
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Source is a directory but a recursive copy was not requested
    #[error("Source is a directory, use a recursive copy: {0}")]
    IsADirectory(PathBuf),

    /// Failed to open the source file for reading
    #[error("Failed to open source file {path}: {source}")]
    SourceOpen {
        /// Source file path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to read the source file contents
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Source file path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to create or truncate the destination file
    #[error("Failed to open destination file {path}: {source}")]
    DestinationOpen {
        /// Destination file path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to write the destination file contents
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination file path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to open a source directory for listing
    #[error("Failed to open source directory {path}: {source}")]
    SourceDir {
        /// Directory being listed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Failed to create a destination directory
    #[error("Failed to create destination directory {path}: {source}")]
    DirectoryCreate {
        /// Directory being created
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Wildcard pattern could not be compiled
    #[error("Invalid wildcard pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The glob component of the pattern
        pattern: String,
        /// Underlying error
        source: globset::Error,
    },

    /// Destination lies inside the source tree (would recurse forever)
    #[error("Cannot copy a directory into itself: {src} -> {dst}")]
    DestinationInsideSource {
        /// Source directory
        src: PathBuf,
        /// Destination directory
        dst: PathBuf,
    },

    /// Symlink loop detected (would cause infinite recursion)
    #[error("Symlink loop detected: {0}")]
    SymlinkLoop(PathBuf),

    /// Maximum directory depth exceeded
    #[error("Maximum depth {max_depth} exceeded at: {path}")]
    MaxDepthExceeded {
        /// The path where max depth was exceeded
        path: PathBuf,
        /// The configured maximum depth
        max_depth: usize,
    },
}

impl Error {
    /// Stable classification of this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            Self::NotADirectory(_)
            | Self::IsADirectory(_)
            | Self::InvalidPattern { .. }
            | Self::DestinationInsideSource { .. } => ErrorCode::InvalidInput,
            Self::SymlinkLoop(_) | Self::MaxDepthExceeded { .. } => ErrorCode::Unsafe,
            Self::Classify { source, .. }
            | Self::SourceOpen { source, .. }
            | Self::Read { source, .. }
            | Self::DestinationOpen { source, .. }
            | Self::Write { source, .. }
            | Self::SourceDir { source, .. }
            | Self::DirectoryCreate { source, .. } => ErrorCode::from_io(source),
        }
    }
}

/// Machine-readable error classification.
///
/// The CLI prints it in diagnostics and derives its exit code from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Bad arguments or a source of the wrong kind
    InvalidInput,
    /// A path that had to exist did not
    SourceNotFound,
    /// The operating system refused access
    PermissionDenied,
    /// The destination ran out of space
    NoSpace,
    /// Symlink loop or depth limit
    Unsafe,
    /// Any other IO failure
    IoError,
}

impl ErrorCode {
    /// Classify a raw IO error.
    #[must_use]
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        match error.kind() {
            io::ErrorKind::NotFound => Self::SourceNotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::IoError,
        }
    }

    /// Snake-case name of the code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::SourceNotFound => "source_not_found",
            Self::PermissionDenied => "permission_denied",
            Self::NoSpace => "no_space",
            Self::Unsafe => "unsafe",
            Self::IoError => "io_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
