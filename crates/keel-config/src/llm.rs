//! Language-model provider configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default OpenAI-compatible API base.
fn default_base_url() -> String {
    String::from("https://api.openai.com/v1")
}

fn default_model() -> String {
    String::from("gpt-3.5-turbo")
}

const fn default_max_tokens() -> u32 {
    500
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_system_prompt() -> String {
    String::from("You are an expert in regional economic policy and development.")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Bearer token for the provider. Also read from `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of an OpenAI-compatible API (no trailing `/chat/completions`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout; a timed-out call fails rather than hangs.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// System message sent ahead of every grounded prompt.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl LlmConfig {
    /// Check if the provider config has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty() && !self.model.is_empty()
    }

    /// Fail unless the fields a chat-completions call needs are all set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFields`] naming every empty field.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        let missing: Vec<&'static str> = [
            ("api_key", self.api_key.is_empty()),
            ("base_url", self.base_url.is_empty()),
            ("model", self.model.is_empty()),
        ]
        .into_iter()
        .filter_map(|(field, empty)| empty.then_some(field))
        .collect();

        if missing.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::MissingFields {
                section: "llm",
                missing,
            })
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".to_string(),
                reason: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        Ok(())
    }
}
