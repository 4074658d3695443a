//! Retrieval and context-assembly configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_corpus_dir() -> String {
    String::from("docs/policies")
}

const fn default_top_k() -> usize {
    3
}

const fn default_min_score() -> f64 {
    0.1
}

/// Three passages of roughly 800 characters each.
const fn default_max_context_chars() -> usize {
    2400
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Directory holding the policy documents (`*.txt`, `*.md`).
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: String,

    /// Passages retrieved per question.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Passages scoring below this are not offered to the model.
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Character budget for passage text in the prompt context.
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            corpus_dir: default_corpus_dir(),
            top_k: default_top_k(),
            min_score: default_min_score(),
            max_context_chars: default_max_context_chars(),
        }
    }
}

impl RetrievalConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: format!("retrieval.{field}"),
            reason: reason.to_string(),
        };
        if self.top_k == 0 {
            return Err(invalid("top_k", "must be at least 1"));
        }
        if self.max_context_chars == 0 {
            return Err(invalid("max_context_chars", "must be at least 1"));
        }
        if !self.min_score.is_finite() {
            return Err(invalid("min_score", "must be a finite number"));
        }
        Ok(())
    }
}
