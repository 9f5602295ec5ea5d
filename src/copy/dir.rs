//! Directory copy operations.
//!
//! This module mirrors a source directory tree at a destination: every
//! directory is recreated, every other entry is handed to the single file
//! copier, and subdirectories are walked recursively.

use crate::classify::{PathKind, classify};
use crate::error::{Error, Result};
use crate::options::CopyOptions;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::file::copy_file;
use super::utils::{build_pool, copy_batch, ensure_dir, get_dir_key, list_dir};

/// Statistics from a copy operation.
///
/// Returned by [`copy_dir`] and [`copy_wildcard`](crate::copy_wildcard) to
/// provide information about what was copied.
///
/// # Example
///
/// ```no_run
/// use mycp::{copy_dir, CopyOptions};
/// use std::path::Path;
///
/// let stats = copy_dir(Path::new("src"), Path::new("dst"), &CopyOptions::default())?;
/// println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
/// # Ok::<(), mycp::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Number of files successfully copied
    pub files_copied: u64,
    /// Number of directories created (existing ones are not counted)
    pub dirs_created: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Duration of the copy operation
    pub duration: std::time::Duration,
}

/// Copy a directory recursively.
///
/// # Traversal
///
/// 1. The source directory is listed (`.` and `..` excluded, names sorted
///    unless [`CopyOptions::sort_entries`] is off)
/// 2. The destination directory is created with [`CopyOptions::dir_mode`];
///    an existing destination is reused
/// 3. Each entry is classified: directories recurse, everything else is
///    copied with [`copy_file`](crate::copy_file)
///
/// Symlinks are followed. A link back to an ancestor directory is reported
/// as [`Error::SymlinkLoop`] instead of recursing forever.
///
/// With [`CopyOptions::parallel`] > 1 the files of each directory are copied
/// concurrently after the directory is created, then its subdirectories are
/// walked in order.
///
/// The first failure aborts the traversal. Files and directories already
/// written stay on disk.
///
/// # Errors
///
/// Returns an error if:
/// - Source does not exist ([`Error::SourceNotFound`])
/// - Source is not a directory ([`Error::NotADirectory`])
/// - Destination lies strictly inside the source ([`Error::DestinationInsideSource`])
/// - A source directory cannot be listed ([`Error::SourceDir`])
/// - A destination directory cannot be created ([`Error::DirectoryCreate`])
/// - An entry cannot be classified or vanished while copying
/// - Symlink loop detected ([`Error::SymlinkLoop`])
/// - Max depth exceeded ([`Error::MaxDepthExceeded`])
/// - Any file copy fails (see [`copy_file`](crate::copy_file))
pub fn copy_dir(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopyStats> {
    let start_time = Instant::now();

    match classify(src)? {
        PathKind::Directory => {}
        PathKind::File => return Err(Error::NotADirectory(src.to_path_buf())),
        PathKind::NotFound => return Err(Error::SourceNotFound(src.to_path_buf())),
    }

    ensure_outside_source(src, dst)?;

    let pool = build_pool(options);
    let mut walker = TreeWalker {
        options,
        pool: pool.as_ref(),
        ancestors: Vec::new(),
        stats: CopyStats::default(),
    };
    walker.walk(src, dst, 0)?;

    let mut stats = walker.stats;
    stats.duration = start_time.elapsed();
    Ok(stats)
}

/// Refuse destinations strictly inside the source tree.
///
/// A destination equal to the source is allowed and rewrites every file in
/// place. Only checked when the destination's parent already exists; otherwise
/// creating the destination fails on its own.
fn ensure_outside_source(src: &Path, dst: &Path) -> Result<()> {
    let Ok(src_canonical) = fs::canonicalize(src) else {
        return Ok(());
    };

    let dst_canonical = match fs::canonicalize(dst) {
        Ok(path) => path,
        Err(_) => {
            let parent = match dst.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            match (fs::canonicalize(parent), dst.file_name()) {
                (Ok(parent), Some(name)) => parent.join(name),
                _ => return Ok(()),
            }
        }
    };

    if dst_canonical != src_canonical && dst_canonical.starts_with(&src_canonical) {
        return Err(Error::DestinationInsideSource {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }
    Ok(())
}

/// Recursive walk state shared across one [`copy_dir`] call.
struct TreeWalker<'a> {
    options: &'a CopyOptions,
    pool: Option<&'a rayon::ThreadPool>,
    /// Keys of the directories on the current path from the root
    ancestors: Vec<(u64, u64)>,
    stats: CopyStats,
}

impl TreeWalker<'_> {
    fn walk(&mut self, src: &Path, dst: &Path, depth: usize) -> Result<()> {
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(Error::MaxDepthExceeded {
                    path: src.to_path_buf(),
                    max_depth,
                });
            }
        }

        let key = get_dir_key(src).map_err(|source| Error::Classify {
            path: src.to_path_buf(),
            source,
        })?;
        if self.ancestors.contains(&key) {
            return Err(Error::SymlinkLoop(src.to_path_buf()));
        }

        let names = list_dir(src, self.options)?;

        if ensure_dir(dst, self.options)? {
            self.stats.dirs_created += 1;
            self.options
                .verbose(&format!("created directory {}", dst.display()));
        }

        self.ancestors.push(key);
        let result = match self.pool {
            None => self.copy_entries_in_order(src, dst, &names, depth),
            Some(pool) => self.copy_entries_pooled(src, dst, &names, depth, pool),
        };
        self.ancestors.pop();
        result
    }

    fn copy_entries_in_order(
        &mut self,
        src: &Path,
        dst: &Path,
        names: &[std::ffi::OsString],
        depth: usize,
    ) -> Result<()> {
        for name in names {
            let src_path = src.join(name);
            let dst_path = dst.join(name);

            match classify(&src_path)? {
                PathKind::Directory => self.walk(&src_path, &dst_path, depth + 1)?,
                PathKind::File => {
                    let bytes = copy_file(&src_path, &dst_path, self.options)?;
                    self.stats.files_copied += 1;
                    self.stats.bytes_copied += bytes;
                }
                PathKind::NotFound => return Err(Error::SourceNotFound(src_path)),
            }
        }
        Ok(())
    }

    fn copy_entries_pooled(
        &mut self,
        src: &Path,
        dst: &Path,
        names: &[std::ffi::OsString],
        depth: usize,
        pool: &rayon::ThreadPool,
    ) -> Result<()> {
        let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();
        let mut dirs: Vec<(PathBuf, PathBuf)> = Vec::new();

        // Classify everything before the first copy
        for name in names {
            let src_path = src.join(name);
            let dst_path = dst.join(name);
            match classify(&src_path)? {
                PathKind::Directory => dirs.push((src_path, dst_path)),
                PathKind::File => files.push((src_path, dst_path)),
                PathKind::NotFound => return Err(Error::SourceNotFound(src_path)),
            }
        }

        let bytes = copy_batch(&files, self.options, Some(pool))?;
        self.stats.files_copied += files.len() as u64;
        self.stats.bytes_copied += bytes;

        for (src_path, dst_path) in &dirs {
            self.walk(src_path, dst_path, depth + 1)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
