//! OllamaProvider -- concrete [`LlmProvider`] implementation for an
//! Ollama-compatible chat endpoint.
//!
//! Sends the assembled context array to `/api/chat` in non-streaming mode
//! and returns the reply text. Failures surface as [`LlmError`]; the core
//! never retries, and any timeout comes from the reqwest client configured
//! here.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use parlance_core::llm::LlmProvider;
use parlance_types::llm::{ContextMessage, LlmError};

/// Ollama-compatible chat provider.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    /// Create a new provider.
    ///
    /// * `base_url` - endpoint root (e.g., "http://localhost:11434")
    /// * `model` - model identifier passed through to the runtime
    pub fn new(base_url: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Wire types for the Ollama chat API. These are endpoint-specific shapes,
// NOT the generic context types from parlance-types.
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, context: &[ContextMessage]) -> Result<String, LlmError> {
        let request = OllamaChatRequest {
            model: &self.model,
            messages: context
                .iter()
                .map(|m| OllamaChatMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider {
                message: format!("chat endpoint returned {status}: {body}"),
            });
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(e.to_string()))?;

        Ok(parsed.message.content)
    }
}
