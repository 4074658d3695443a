//! Scoring error types.

use keel_core::CoreError;

/// Errors from derivation, normalization, and scoring.
///
/// All are fatal for the batch: no partial results are produced.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// Records in the batch disagree on their indicator columns, or a
    /// column the policy needs is absent.
    #[error("schema mismatch for metro {metro_code}: missing {missing:?}, unexpected {unexpected:?}")]
    SchemaMismatch {
        metro_code: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A raw value is NaN or infinite.
    #[error("non-finite value for '{indicator}' in metro {metro_code}")]
    NonFinite {
        metro_code: String,
        indicator: String,
    },

    /// Composite or component weights are negative or do not sum to 1.
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// The indicator-to-component model is malformed.
    #[error("invalid scoring model: {0}")]
    InvalidModel(String),
}

impl ScoringError {
    /// Map a policy validation failure onto [`ScoringError::InvalidWeights`].
    pub(crate) fn weights(context: Option<&str>, error: CoreError) -> Self {
        let reason = match error {
            CoreError::Validation(reason) => reason,
            other => other.to_string(),
        };
        match context {
            Some(context) => Self::InvalidWeights(format!("{context}: {reason}")),
            None => Self::InvalidWeights(reason),
        }
    }
}
