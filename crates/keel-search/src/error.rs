//! Search error types for keel-search.

use std::path::PathBuf;

/// Errors from corpus loading and retrieval.
///
/// Degenerate inputs (empty corpus, a query with no known terms) are not
/// errors; they produce empty results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid query parameters, e.g. `top_k == 0`.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The corpus directory is missing or cannot be walked.
    #[error("corpus error: {0}")]
    Corpus(String),

    /// A corpus document could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
