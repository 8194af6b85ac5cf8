//! Output module for persisting extracted records
//!
//! This module handles:
//! - Naming the run's output file from the prefix and run timestamp
//! - Writing records as CSV or JSON
//! - Summarising a run

mod csv_output;
mod json_output;
mod summary;

pub use csv_output::{join_links, split_links, write_csv, write_csv_to, LINK_DELIMITER};
pub use json_output::{read_json, write_json, write_json_to};
pub use summary::{print_summary, RunSummary, TargetFailure};

use crate::config::{OutputFormat, Settings};
use crate::record::Record;
use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing output
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type WriteResult<T> = Result<T, WriteError>;

/// Path of a run's output file
///
/// `<data_dir>/<filename_prefix>_<YYYYmmdd_HHMMSS>.<ext>`
pub fn output_path(settings: &Settings, started_at: DateTime<Utc>) -> PathBuf {
    numbered_output_path(settings, started_at, 0)
}

/// Output path with a `_<n>` suffix before the extension (none for 0)
fn numbered_output_path(settings: &Settings, started_at: DateTime<Utc>, n: u32) -> PathBuf {
    let suffix = if n == 0 {
        String::new()
    } else {
        format!("_{}", n)
    };
    settings.data_dir.join(format!(
        "{}_{}{}.{}",
        settings.filename_prefix,
        started_at.format("%Y%m%d_%H%M%S"),
        suffix,
        settings.output_format.extension()
    ))
}

/// Creates the run's output file without replacing an existing one
///
/// Runs started within the same second share a timestamp, so taken names
/// get the next free numeric suffix.
fn create_output_file(
    settings: &Settings,
    started_at: DateTime<Utc>,
) -> WriteResult<(PathBuf, File)> {
    let mut n = 0;
    loop {
        let path = numbered_output_path(settings, started_at, n);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("{} already exists, trying next name", path.display());
                n += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Writes all records of a run to a single file
///
/// Creates the data directory if it does not exist. An empty record list
/// still produces a file (header-only CSV, or `[]`).
///
/// # Arguments
///
/// * `records` - The records to write, in target order
/// * `settings` - Supplies format, directory and file name prefix
/// * `started_at` - Run start time, used as the run identifier
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file, never a pre-existing one
/// * `Err(WriteError)` - The directory or file could not be written
pub fn write_records(
    records: &[Record],
    settings: &Settings,
    started_at: DateTime<Utc>,
) -> WriteResult<PathBuf> {
    ensure_dir(&settings.data_dir)?;

    let (path, file) = create_output_file(settings, started_at)?;
    match settings.output_format {
        OutputFormat::Csv => write_csv_to(records, file)?,
        OutputFormat::Json => write_json_to(records, file)?,
    }

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(path)
}

fn ensure_dir(path: &Path) -> WriteResult<()> {
    std::fs::create_dir_all(path).map_err(|source| WriteError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
