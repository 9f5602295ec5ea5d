//! Path classification.
//!
//! Every routing decision in mycp (copy a file, walk a directory, reject a
//! source) starts with a status query on the path. [`classify`] performs that
//! query once and reduces it to a [`PathKind`], keeping "does not exist"
//! separate from real failures so callers can pick their own diagnostic.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// What a path refers to, as far as copying is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Anything that is not a directory (regular files, devices, fifos)
    File,
    /// A directory
    Directory,
    /// Nothing exists at the path (including a symlink whose target is gone)
    NotFound,
}

/// Classify `path` by querying its status.
///
/// Symlinks are followed, so a link to a directory is a [`PathKind::Directory`]
/// and a dangling link is [`PathKind::NotFound`].
///
/// # Errors
///
/// - [`Error::PermissionDenied`] if the status query is refused
/// - [`Error::Classify`] for any other query failure
///
/// # Example
///
/// ```no_run
/// use mycp::{PathKind, classify};
/// use std::path::Path;
///
/// match classify(Path::new("/etc"))? {
///     PathKind::Directory => println!("directory"),
///     PathKind::File => println!("file"),
///     PathKind::NotFound => println!("missing"),
/// }
/// # Ok::<(), mycp::Error>(())
/// ```
pub fn classify(path: &Path) -> Result<PathKind> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(PathKind::Directory),
        Ok(_) => Ok(PathKind::File),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PathKind::NotFound),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Err(Error::PermissionDenied {
            path: path.to_path_buf(),
            source: e,
        }),
        Err(e) => Err(Error::Classify {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
