//! Utility functions for directory traversal.
//!
//! Helpers shared by the tree walker and the wildcard resolver: creating
//! destination directories, listing source directories, copying a batch of
//! files on the worker pool, and identifying directories for loop detection.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use rayon::prelude::*;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::copy_file;

// =============================================================================
// Directory creation
// =============================================================================

/// Create `dir` with the configured directory mode.
///
/// Returns `Ok(true)` if the directory was created and `Ok(false)` if
/// something already existed at that path. Only the final component is
/// created; a missing parent is an error like any other.
pub(crate) fn ensure_dir(dir: &Path, options: &CopyOptions) -> Result<bool> {
    let mut builder = fs::DirBuilder::new();

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(options.dir_mode);
    }
    #[cfg(not(unix))]
    let _ = options;

    match builder.create(dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source: e,
        }),
    }
}

// =============================================================================
// Directory listing
// =============================================================================

/// List the entry names of `dir`.
///
/// `.` and `..` are never included. Names are sorted when
/// [`CopyOptions::sort_entries`] is set; otherwise the listing order is kept.
/// The directory handle is closed before this returns.
pub(crate) fn list_dir(dir: &Path, options: &CopyOptions) -> Result<Vec<OsString>> {
    let to_err = |source: io::Error| Error::SourceDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = fs::read_dir(dir)
        .map_err(to_err)?
        .map(|entry| entry.map(|e| e.file_name()))
        .filter(|name| !matches!(name, Ok(n) if n.as_os_str() == "." || n.as_os_str() == ".."))
        .collect::<io::Result<Vec<_>>>()
        .map_err(to_err)?;

    if options.sort_entries {
        names.sort();
    }

    Ok(names)
}

// =============================================================================
// File batches
// =============================================================================

/// Build the worker pool for [`CopyOptions::parallel`] > 1.
///
/// Returns `None` for sequential copies. If the pool cannot be built the
/// copy falls back to running sequentially.
pub(crate) fn build_pool(options: &CopyOptions) -> Option<rayon::ThreadPool> {
    if options.parallel <= 1 {
        return None;
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(options.parallel)
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            options.warn(&format!(
                "Failed to create thread pool ({e}), copying sequentially"
            ));
            None
        }
    }
}

/// Copy every `(src, dst)` pair, returning the total bytes written.
///
/// Without a pool the pairs are copied in order. With a pool they are copied
/// concurrently; the first failure stops new copies from starting and is
/// returned once in-flight copies finish.
pub(crate) fn copy_batch(
    pairs: &[(PathBuf, PathBuf)],
    options: &CopyOptions,
    pool: Option<&rayon::ThreadPool>,
) -> Result<u64> {
    match pool {
        None => pairs.iter().try_fold(0u64, |total, (src, dst)| {
            Ok(total + copy_file(src, dst, options)?)
        }),
        Some(pool) => pool.install(|| {
            pairs
                .par_iter()
                .map(|(src, dst)| copy_file(src, dst, options))
                .try_reduce(|| 0, |a, b| Ok(a + b))
        }),
    }
}

// =============================================================================
// Directory identity
// =============================================================================

/// Get a unique key for a directory based on device and inode.
///
/// This is used for cycle detection and is much faster than canonicalize().
/// Symlinks are followed, matching how the walker classifies entries.
#[cfg(unix)]
pub(crate) fn get_dir_key(path: &Path) -> io::Result<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    let meta = fs::metadata(path)?;
    Ok((meta.dev(), meta.ino()))
}

/// Get a unique key for a directory.
///
/// Without inode numbers the canonical path is hashed instead.
#[cfg(not(unix))]
pub(crate) fn get_dir_key(path: &Path) -> io::Result<(u64, u64)> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let canonical = fs::canonicalize(path)?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}
