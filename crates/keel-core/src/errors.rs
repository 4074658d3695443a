//! Cross-cutting error types for Keel.
//!
//! Domain-specific errors (e.g., `ScoringError`, `SearchError`) are defined in
//! their respective crates. A unified error is deferred to `keel-service` and
//! the CLI, where all crate errors converge.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can be raised by any Keel crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Reading or writing a JSONL table failed.
    #[error("Table I/O failed for {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data failed validation (weights, model shape, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
