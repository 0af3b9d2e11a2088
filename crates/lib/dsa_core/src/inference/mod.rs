//! Inference module — the hosted language model the chat service forwards to.
//!
//! The model is treated as an opaque capability: an ordered list of
//! role-tagged messages goes in, one completion comes out. Calls are
//! single-shot; there is no retry, streaming, or timeout handling here.
//!
//! # Providers
//!
//! - `"ollama"` — Ollama-style chat API (`/api/chat`), optional bearer key
//! - `"openai"` — OpenAI-compatible chat completions (`/v1/chat/completions`)

pub mod config;
pub mod ollama;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use config::InferenceConfig;

/// Errors that can occur while calling the model.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream error: status={status}, body={body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    Human,
}

impl Role {
    /// Role name as chat APIs expect it on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::Human => "user",
        }
    }
}

/// One role-tagged message sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }
}

/// The model's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub content: String,
}

/// Message shape shared by the chat APIs on the wire.
#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

fn wire_messages(messages: &[ChatMessage]) -> Vec<WireMessage<'_>> {
    messages
        .iter()
        .map(|m| WireMessage {
            role: m.role.wire_name(),
            content: &m.content,
        })
        .collect()
}

/// A hosted model that answers a message sequence.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn invoke(&self, messages: &[ChatMessage]) -> Result<Completion, InferenceError>;
}

/// Build the provider named in `config.provider`.
pub fn build_provider(
    config: &InferenceConfig,
) -> Result<Arc<dyn InferenceProvider>, InferenceError> {
    let client = Client::new();
    match config.provider.as_str() {
        "ollama" => Ok(Arc::new(ollama::OllamaProvider::new(client, config.clone()))),
        "openai" => Ok(Arc::new(openai::OpenAiProvider::new(client, config.clone())?)),
        other => Err(InferenceError::Config(format!(
            "Unsupported inference provider: {other}"
        ))),
    }
}
