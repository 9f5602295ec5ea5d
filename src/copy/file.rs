//! Single file copy operations.
//!
//! This module copies the full contents of one file to one destination,
//! creating or truncating the destination with a fixed mode.

use crate::error::{Error, Result};
use crate::options::{CopyOptions, CopyStrategy};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// Copy the contents of `src` to `dst`.
///
/// The destination is created if absent and truncated if present. A newly
/// created destination gets [`CopyOptions::file_mode`] (`0o600` by default)
/// regardless of the source's mode; an existing destination keeps its mode.
///
/// The source is opened and fully read before the destination is touched, so
/// a source that cannot be opened or read never leaves a destination behind.
///
/// Copying a file onto itself (the same path, a hard link or a symlink to
/// it) always reads the whole file first, even with
/// [`CopyStrategy::Streaming`], and leaves the contents unchanged.
///
/// # Arguments
///
/// * `src` - Source file path
/// * `dst` - Destination file path
/// * `options` - Copy options
///
/// # Returns
///
/// The number of bytes written to `dst`.
///
/// # Errors
///
/// Returns an error if:
/// - Source cannot be opened ([`Error::SourceOpen`])
/// - Source cannot be read, including when it is a directory ([`Error::Read`])
/// - Destination cannot be created or truncated ([`Error::DestinationOpen`])
/// - Writing the destination fails ([`Error::Write`])
///
/// # Example
///
/// ```no_run
/// use mycp::{CopyOptions, copy_file};
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("a.txt"), Path::new("b.txt"), &CopyOptions::default())?;
/// println!("copied {bytes} bytes");
/// # Ok::<(), mycp::Error>(())
/// ```
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let mut src_file = File::open(src).map_err(|source| Error::SourceOpen {
        path: src.to_path_buf(),
        source,
    })?;

    let strategy = match options.strategy {
        CopyStrategy::Streaming if is_same_file(&src_file, src, dst) => CopyStrategy::WholeFile,
        strategy => strategy,
    };

    let bytes = match strategy {
        CopyStrategy::WholeFile => {
            let contents = read_whole(&mut src_file).map_err(|source| Error::Read {
                path: src.to_path_buf(),
                source,
            })?;
            let mut dst_file = open_destination(dst, options)?;
            dst_file.write_all(&contents).map_err(|source| Error::Write {
                path: dst.to_path_buf(),
                source,
            })?;
            contents.len() as u64
        }
        CopyStrategy::Streaming => stream(&mut src_file, src, dst, options)?,
    };

    options.verbose(&format!(
        "copied {} -> {} ({} bytes)",
        src.display(),
        dst.display(),
        bytes
    ));

    Ok(bytes)
}

/// Read the whole file into a buffer sized from its declared length.
///
/// The length only sizes the allocation. Reads loop until EOF, so a single
/// `read` call is never assumed to return everything.
fn read_whole(file: &mut File) -> io::Result<Vec<u8>> {
    let len = file.metadata()?.len();
    let capacity = usize::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::OutOfMemory,
            format!("file of {len} bytes does not fit in memory"),
        )
    })?;

    let mut contents = Vec::new();
    contents
        .try_reserve_exact(capacity)
        .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Copy through a fixed-size buffer.
///
/// The destination is only opened after the first read succeeds, so an
/// unreadable source (such as a directory) still leaves nothing behind.
fn stream(src_file: &mut File, src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    const CHUNK: usize = 64 * 1024;

    let read_err = |source| Error::Read {
        path: src.to_path_buf(),
        source,
    };
    let write_err = |source| Error::Write {
        path: dst.to_path_buf(),
        source,
    };

    let mut buf = vec![0u8; CHUNK];
    let first = read_retrying(src_file, &mut buf).map_err(read_err)?;
    let mut dst_file = open_destination(dst, options)?;
    dst_file.write_all(&buf[..first]).map_err(write_err)?;

    let mut total = first as u64;
    if first == 0 {
        return Ok(total);
    }
    loop {
        let n = read_retrying(src_file, &mut buf).map_err(read_err)?;
        if n == 0 {
            break;
        }
        dst_file.write_all(&buf[..n]).map_err(write_err)?;
        total += n as u64;
    }
    Ok(total)
}

/// Whether `dst` already exists and is the file behind `src_file`.
#[cfg(unix)]
fn is_same_file(src_file: &File, _src: &Path, dst: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (src_file.metadata(), std::fs::metadata(dst)) {
        (Ok(src_meta), Ok(dst_meta)) => {
            (src_meta.dev(), src_meta.ino()) == (dst_meta.dev(), dst_meta.ino())
        }
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(_src_file: &File, src: &Path, dst: &Path) -> bool {
    match (std::fs::canonicalize(src), std::fs::canonicalize(dst)) {
        (Ok(src), Ok(dst)) => src == dst,
        _ => false,
    }
}

fn read_retrying(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match file.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

fn open_destination(dst: &Path, options: &CopyOptions) -> Result<File> {
    let mut open = OpenOptions::new();
    open.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        open.mode(options.file_mode);
    }
    #[cfg(not(unix))]
    let _ = options;

    open.open(dst).map_err(|source| Error::DestinationOpen {
        path: dst.to_path_buf(),
        source,
    })
}

// =============================================================================
// Tests
// =============================================================================
