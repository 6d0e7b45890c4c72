//! Ollama client - best-effort text generation over HTTP
//!
//! Single non-streaming call against a local Ollama `/api/generate`
//! endpoint, with a bounded timeout and three distinguished failure
//! modes (unreachable, model missing, other HTTP error).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Assistant backend failures, each mapped to its own chat diagnostic.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant endpoint unreachable")]
    Unreachable,

    #[error("model not installed: {0}")]
    ModelNotFound(String),

    #[error("HTTP error: status {0}")]
    Http(u16),

    #[error("unexpected assistant error: {0}")]
    Unexpected(String),
}

/// Configuration for the generation endpoint.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:11434/api/generate".to_string(),
            model: "qwen2.5".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Blocking HTTP client for the Ollama generation endpoint.
pub struct OllamaClient {
    config: AssistantConfig,
    http: reqwest::blocking::Client,
}

impl OllamaClient {
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistantError::Unexpected(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Answer a general question through the banking-assistant preamble.
    pub fn generate(&self, question: &str) -> Result<String, AssistantError> {
        let prompt = format!(
            "You are a helpful banking assistant. Answer the user's question concisely. Question: {}",
            question
        );
        let payload = GenerateRequest {
            model: &self.config.model,
            prompt: &prompt,
            stream: false,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .json(&payload)
            .send()
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    AssistantError::Unreachable
                } else {
                    AssistantError::Unexpected(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(AssistantError::ModelNotFound(self.config.model.clone()));
        }
        if !status.is_success() {
            return Err(AssistantError::Http(status.as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| AssistantError::Unexpected(e.to_string()))?;
        Ok(body
            .response
            .unwrap_or_else(|| "Sorry, I received an empty response.".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssistantConfig::default();
        assert_eq!(config.model, "qwen2.5");
        assert!(config.api_url.contains("11434"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_request_payload_shape() {
        let payload = GenerateRequest {
            model: "qwen2.5",
            prompt: "hello",
            stream: false,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["model"], "qwen2.5");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AssistantError::ModelNotFound("qwen2.5".into()).to_string(),
            "model not installed: qwen2.5"
        );
        assert_eq!(AssistantError::Http(500).to_string(), "HTTP error: status 500");
    }
}
