//! RAG error types.

use thiserror::Error;

/// Errors from a language-model provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Failed to parse a provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// No API key or model configured.
    #[error("language model not configured: {0}")]
    NotConfigured(String),
}

/// Errors from answer synthesis.
#[derive(Debug, Error)]
pub enum RagError {
    /// The language model failed or timed out. Not retried here; callers may
    /// retry the whole request.
    #[error("answer generation unavailable: {0}")]
    GenerationUnavailable(#[source] ProviderError),

    /// The context budget cannot hold any text.
    #[error("invalid context budget: max_context_chars must be at least 1")]
    InvalidBudget,
}
