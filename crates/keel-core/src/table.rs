//! JSONL table I/O for indicator and score tables.
//!
//! One row per line, keyed by metro identity. `f64` values are written in
//! shortest round-trip form and parsed exactly, so a table read and written
//! back is byte-for-byte value-identical.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::CoreError;
use crate::indicators::MetroIndicatorRecord;
use crate::scores::ResilienceScoreRecord;

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CoreError> {
    let wrap = |source| CoreError::Table {
        path: path.to_path_buf(),
        source,
    };
    serde_jsonlines::json_lines(path)
        .map_err(wrap)?
        .collect::<std::io::Result<Vec<T>>>()
        .map_err(wrap)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), CoreError> {
    serde_jsonlines::write_json_lines(path, rows).map_err(|source| CoreError::Table {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a raw indicator table.
///
/// # Errors
///
/// Returns [`CoreError::Table`] if the file is unreadable or a row is malformed.
pub fn read_indicator_table(path: &Path) -> Result<Vec<MetroIndicatorRecord>, CoreError> {
    read_rows(path)
}

/// Write a raw indicator table, replacing any existing file.
///
/// # Errors
///
/// Returns [`CoreError::Table`] if the file cannot be written.
pub fn write_indicator_table(path: &Path, rows: &[MetroIndicatorRecord]) -> Result<(), CoreError> {
    write_rows(path, rows)
}

/// Read a score table.
///
/// # Errors
///
/// Returns [`CoreError::Table`] if the file is unreadable or a row is malformed.
pub fn read_score_table(path: &Path) -> Result<Vec<ResilienceScoreRecord>, CoreError> {
    read_rows(path)
}

/// Write a score table, replacing any existing file.
///
/// # Errors
///
/// Returns [`CoreError::Table`] if the file cannot be written.
pub fn write_score_table(path: &Path, rows: &[ResilienceScoreRecord]) -> Result<(), CoreError> {
    write_rows(path, rows)
}
