//! Chat providers: the trait, the OpenAI-compatible HTTP implementation
//! and a canned provider for tests.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AiError;

/// Trait for chat-completions backends.
///
/// One system message, one user message, one free-text reply. Constructed
/// once at startup and injected as a trait object.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Send one system + user message pair and return the reply verbatim.
    async fn complete(&self, system: &str, user: &str) -> Result<String, AiError>;
}

// ============================================================================
// OpenAI-compatible provider
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Error body an OpenAI-compatible endpoint returns on failures.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Chat provider speaking the OpenAI chat-completions wire format.
///
/// Works against any compatible endpoint via `base_url`; the key travels
/// in an `Authorization: Bearer` header.
pub struct OpenAiChatProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChatProvider {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatProvider {
    fn id(&self) -> &'static str {
        "OPENAI"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.7,
        };

        debug!("Chat request to {} with model {}", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(detail) = error_resp.error {
                    return Err(AiError::provider(detail.message));
                }
            }
            return Err(AiError::provider(format!("HTTP {} - {}", status, body)));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| AiError::provider(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}

// ============================================================================
// Canned provider
// ============================================================================

/// Provider that replies with a fixed string and records every prompt it
/// receives. Used in tests and offline demos.
#[derive(Default)]
pub struct CannedChatProvider {
    reply: String,
    prompts: std::sync::Mutex<Vec<(String, String)>>,
}

impl CannedChatProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Every (system, user) pair seen so far, in call order.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for CannedChatProvider {
    fn id(&self) -> &'static str {
        "CANNED"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, AiError> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_wire_format() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are an analyst.",
                },
                ChatMessage {
                    role: "user",
                    content: "Analyze this.",
                },
            ],
            temperature: 0.7,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Analyze this.");
    }

    #[test]
    fn test_chat_response_parsing() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": "Looks healthy." },
                    "finish_reason": "stop"
                }
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("Looks healthy.")
        );
    }

    #[test]
    fn test_error_response_parsing() {
        let json = r#"{ "error": { "message": "Invalid API key", "type": "auth" } }"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.unwrap().message, "Invalid API key");
    }

    #[tokio::test]
    async fn test_canned_provider_records_prompts() {
        let provider = CannedChatProvider::new("fixed reply");
        let reply = provider.complete("system text", "user text").await.unwrap();
        assert_eq!(reply, "fixed reply");

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, "system text");
    }
}
