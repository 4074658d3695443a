//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> usize {
    10
}

fn default_indicators_path() -> String {
    String::from("data/metro_indicators.jsonl")
}

fn default_scores_path() -> String {
    String::from("data/metro_resilience_scores.jsonl")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for ranking commands.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Raw indicator table read by scoring commands.
    #[serde(default = "default_indicators_path")]
    pub indicators_path: String,

    /// Where `keel score` writes the score table.
    #[serde(default = "default_scores_path")]
    pub scores_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            indicators_path: default_indicators_path(),
            scores_path: default_scores_path(),
        }
    }
}
