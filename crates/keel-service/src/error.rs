//! Service error types.

use keel_config::ConfigError;
use keel_rag::RagError;
use keel_scoring::ScoringError;
use keel_search::SearchError;

/// Errors surfaced to dashboard callers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Rag(#[from] RagError),
}
