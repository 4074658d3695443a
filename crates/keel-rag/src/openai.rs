//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use keel_config::LlmConfig;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::http::{check_response, transport_error};
use crate::llm::LanguageModel;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`LanguageModel`] backed by `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f32,
    timeout_secs: u64,
}

impl OpenAiClient {
    /// Build a client from the `[llm]` config section.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::NotConfigured`] without an API key, base URL, or model.
    /// - [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &LlmConfig) -> Result<Self, ProviderError> {
        if !config.is_configured() {
            return Err(ProviderError::NotConfigured(
                "set llm.api_key or OPENAI_API_KEY".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("keel/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt))
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;
        let resp = check_response(resp).await?;

        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;
        let answer = parse_completion(&body)?;
        tracing::debug!(model = %self.model, chars = answer.len(), "completion received");
        Ok(answer)
    }
}

impl LanguageModel for OpenAiClient {
    async fn answer(&self, prompt: &str) -> Result<String, ProviderError> {
        self.complete(prompt).await
    }
}

/// Extract the first choice's message content.
fn parse_completion(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| ProviderError::Parse("response has no message content".to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"{
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "  Diversify the supplier base [1].\n"
                },
                "finish_reason": "stop"
            }
        ]
    }"#;

    fn configured() -> LlmConfig {
        LlmConfig {
            api_key: "sk-test".into(),
            base_url: "http://localhost:8080/v1/".into(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn parses_first_choice() {
        assert_eq!(parse_completion(FIXTURE).unwrap(), "Diversify the supplier base [1].");
    }

    #[test]
    fn empty_choices_is_parse_error() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn unconfigured_client_is_rejected() {
        let err = OpenAiClient::from_config(&LlmConfig::default()).unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client = OpenAiClient::from_config(&configured()).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn request_carries_system_and_user_messages() {
        let client = OpenAiClient::from_config(&configured()).unwrap();
        let body = serde_json::to_value(client.request("What is resilience?")).unwrap();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(
            body["messages"][0]["content"],
            "You are an expert in regional economic policy and development."
        );
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "What is resilience?");
    }
}
