//! mycp - minimal copy
//!
//! Copies a file, a directory tree (`-r`), or the files matching a wildcard
//! pattern, powered by the mycp library.

use clap::Parser;
use mycp::{CopyBuilder, CopyMode, CopyStats, Error as CopyError, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// mycp - copy files, directory trees and wildcard matches
///
/// Usage:
///   mycp SOURCE DEST
///   mycp -r SOURCE_DIR DEST_DIR
///   mycp 'DIR/*.txt' DEST_DIR
#[derive(Parser, Debug)]
#[command(name = "mycp", version, about, long_about = None)]
struct Args {
    /// Source file, directory (with -r), or wildcard pattern containing `*`
    source: PathBuf,

    /// Destination file or directory
    destination: PathBuf,

    /// Copy directories recursively
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Number of files copied concurrently within a directory
    #[arg(short = 'j', long, default_value = "1")]
    jobs: usize,

    /// Copy entries in directory listing order instead of sorted by name
    #[arg(long)]
    no_sort: bool,

    /// Copy file contents in fixed-size chunks instead of whole-file reads
    #[arg(long)]
    streaming: bool,

    /// Print every created directory and copied file, then a summary
    #[arg(short = 'v', long)]
    verbose: bool,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot copy a directory '{path}' without -r")]
    SourceIsDirectoryWithoutRecursive { path: PathBuf },

    #[error("-r specified but '{path}' is not a directory")]
    RecursiveSourceNotDirectory { path: PathBuf },

    #[error("cannot stat '{path}': No such file or directory")]
    SourceNotFound { path: PathBuf },

    #[error("{source}")]
    Copy { source: CopyError },
}

impl From<CopyError> for CliError {
    fn from(source: CopyError) -> Self {
        match source {
            CopyError::IsADirectory(path) => Self::SourceIsDirectoryWithoutRecursive { path },
            CopyError::NotADirectory(path) => Self::RecursiveSourceNotDirectory { path },
            CopyError::SourceNotFound(path) => Self::SourceNotFound { path },
            source => Self::Copy { source },
        }
    }
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::SourceIsDirectoryWithoutRecursive { .. }
            | Self::RecursiveSourceNotDirectory { .. } => ErrorCode::InvalidInput,
            Self::SourceNotFound { .. } => ErrorCode::SourceNotFound,
            Self::Copy { source } => source.code(),
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        _ => 1,
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("mycp: error[{}]: {}", error.code(), error);
        std::process::exit(exit_code_for(error.code()));
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();

    let mut builder = CopyBuilder::new(&args.source, &args.destination)
        .recursive(args.recursive)
        .parallel(args.jobs)
        .on_warning(|msg| eprintln!("mycp: warning: {msg}"));

    if args.no_sort {
        builder = builder.unsorted();
    }
    if args.streaming {
        builder = builder.streaming();
    }
    if args.verbose {
        builder = builder.verbose(|msg| eprintln!("{msg}"));
    }

    let mode = builder.mode();
    let stats = builder.run()?;

    if args.verbose {
        print_stats(mode, &stats);
    }
    Ok(())
}

fn print_stats(mode: CopyMode, stats: &CopyStats) {
    let what = match mode {
        CopyMode::File => "file",
        CopyMode::Recursive => "tree",
        CopyMode::Wildcard => "wildcard",
    };

    if stats.files_copied == 0 && stats.dirs_created == 0 {
        println!("Nothing to copy ({what})");
        return;
    }

    let mut parts = vec![format!("{} files", stats.files_copied)];
    if stats.dirs_created > 0 {
        parts.push(format!("{} dirs", stats.dirs_created));
    }
    println!(
        "Copied {} ({}) in {:?} ({what})",
        parts.join(", "),
        format_bytes(stats.bytes_copied),
        stats.duration
    );
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
