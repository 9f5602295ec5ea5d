//! Wildcard copy operations.
//!
//! A wildcard source such as `logs/*.txt` names one directory (`logs`) and a
//! shell-style pattern (`*.txt`) matched against the names directly inside
//! it. Matching entries are copied into a destination directory under their
//! own names.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::dir::CopyStats;
use super::utils::{build_pool, copy_batch, ensure_dir, list_dir};

/// Split a wildcard source into the directory to scan and the name pattern.
///
/// Everything before the last `/` is the directory; without a `/` the
/// current directory is scanned. A pattern directly under the root (`/x*`)
/// scans `/`.
///
/// # Example
///
/// ```
/// use mycp::split_pattern;
/// use std::path::Path;
///
/// assert_eq!(split_pattern("logs/*.txt"), (Path::new("logs"), "*.txt"));
/// assert_eq!(split_pattern("*.txt"), (Path::new("."), "*.txt"));
/// assert_eq!(split_pattern("/tmp*"), (Path::new("/"), "tmp*"));
/// ```
pub fn split_pattern(pattern: &str) -> (&Path, &str) {
    match pattern.rsplit_once('/') {
        Some(("", glob)) => (Path::new("/"), glob),
        Some((dir, glob)) => (Path::new(dir), glob),
        None => (Path::new("."), pattern),
    }
}

/// Compile the name part of a wildcard source.
///
/// `*` matches any run of characters, `?` one character and `[...]` a
/// character class. Matching is case-sensitive, a leading `.` is not
/// special, and a backslash escapes the next character.
fn compile_glob(glob: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|g| g.compile_matcher())
        .map_err(|source| Error::InvalidPattern {
            pattern: glob.to_owned(),
            source,
        })
}

/// Copy every entry matching a wildcard source into `dst`.
///
/// The pattern is split with [`split_pattern`]; each entry of the scanned
/// directory whose name matches is copied to `dst/<name>` with
/// [`copy_file`](crate::copy_file). Entries are matched in sorted order
/// unless [`CopyOptions::sort_entries`] is off.
///
/// Matches are not filtered by type: a matching subdirectory is handed to
/// the file copier and fails with [`Error::Read`].
///
/// `dst` is created (with [`CopyOptions::dir_mode`]) before the first copy
/// if it is missing, unless [`CopyOptions::create_wildcard_destination`] is
/// off. A pattern that matches nothing is not an error; a warning is emitted,
/// nothing is created and empty stats are returned.
///
/// # Errors
///
/// Returns an error if:
/// - The name pattern is not a valid glob ([`Error::InvalidPattern`])
/// - The scanned directory cannot be listed ([`Error::SourceDir`])
/// - `dst` cannot be created ([`Error::DirectoryCreate`])
/// - Any matched copy fails (see [`copy_file`](crate::copy_file))
///
/// # Example
///
/// ```no_run
/// use mycp::{CopyOptions, copy_wildcard};
/// use std::path::Path;
///
/// let stats = copy_wildcard("logs/*.txt", Path::new("archive"), &CopyOptions::default())?;
/// println!("Copied {} files", stats.files_copied);
/// # Ok::<(), mycp::Error>(())
/// ```
pub fn copy_wildcard(pattern: &str, dst: &Path, options: &CopyOptions) -> Result<CopyStats> {
    let start_time = Instant::now();

    let (dir, glob) = split_pattern(pattern);
    let matcher = compile_glob(glob)?;

    let matches: Vec<(PathBuf, PathBuf)> = list_dir(dir, options)?
        .into_iter()
        .filter(|name| matcher.is_match(Path::new(name)))
        .map(|name| (dir.join(&name), dst.join(&name)))
        .collect();

    let mut stats = CopyStats::default();

    if matches.is_empty() {
        options.warn(&format!("No entries match pattern: {pattern}"));
        stats.duration = start_time.elapsed();
        return Ok(stats);
    }

    if options.create_wildcard_destination && ensure_dir(dst, options)? {
        stats.dirs_created += 1;
        options.verbose(&format!("created directory {}", dst.display()));
    }

    let pool = build_pool(options);
    stats.bytes_copied = copy_batch(&matches, options, pool.as_ref())?;
    stats.files_copied = matches.len() as u64;
    stats.duration = start_time.elapsed();
    Ok(stats)
}

// =============================================================================
// Tests
// =============================================================================
