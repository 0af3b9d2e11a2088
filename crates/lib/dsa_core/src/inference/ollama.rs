//! Ollama-style chat provider.
//!
//! Calls `POST {base_url}/api/chat` with streaming disabled. Hosted
//! deployments fronted by a gateway take the key as a bearer token.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::config::InferenceConfig;
use super::{ChatMessage, Completion, InferenceError, InferenceProvider, WireMessage, wire_messages};

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: Option<OllamaMessage>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: String,
}

pub struct OllamaProvider {
    client: Client,
    config: InferenceConfig,
}

impl OllamaProvider {
    pub fn new(client: Client, config: InferenceConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl InferenceProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn invoke(&self, messages: &[ChatMessage]) -> Result<Completion, InferenceError> {
        let mut request = self
            .client
            .post(self.config.endpoint("/api/chat"))
            .json(&OllamaRequest {
                model: &self.config.model,
                messages: wire_messages(messages),
                stream: false,
                options: OllamaOptions {
                    temperature: self.config.temperature,
                },
            });
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(InferenceError::Upstream { status, body });
        }

        let data: OllamaResponse = resp
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(format!("Ollama response parse error: {e}")))?;

        data.message
            .map(|m| Completion { content: m.content })
            .ok_or_else(|| InferenceError::InvalidResponse("Ollama response has no message".into()))
    }
}
