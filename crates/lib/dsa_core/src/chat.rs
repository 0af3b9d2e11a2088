//! Chat service — answers a user message with the grants dataset as
//! context.
//!
//! Per request: fetch the dataset snapshot (loading it if needed), render
//! the context, ask the model, then gate the reply on whether the message
//! asked about grants at all.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::grants::store::DatasetStore;
use crate::grants::{ContextError, DatasetUnavailable, context};
use crate::inference::{ChatMessage, Completion, InferenceError, InferenceProvider};

/// System instruction sent ahead of the user's message.
pub const INSTRUCTION: &str =
    "You are a delegated staking agent. Answer questions about granter and grantee grants.";

/// Reply used when the message does not ask about grants or permissions.
pub const CANNED_GREETING: &str = "Hi! How can I assist you with your delegated staking and grants today? Feel free to ask me a question, and I'll be happy to help. 😊";

/// Errors surfaced by [`ChatService::reply`].
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    DatasetUnavailable(#[from] DatasetUnavailable),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl From<ContextError> for ChatError {
    fn from(e: ContextError) -> Self {
        ChatError::Processing(e.to_string())
    }
}

impl From<InferenceError> for ChatError {
    fn from(e: InferenceError) -> Self {
        ChatError::Processing(e.to_string())
    }
}

/// Whether the model's reply should be passed through for `message`.
pub fn mentions_grants(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("grants") || lowered.contains("permission")
}

/// Message sequence sent to the model: instruction, question, context.
pub fn build_messages(message: &str, context: String) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(INSTRUCTION),
        ChatMessage::human(message),
        ChatMessage::system(context),
    ]
}

#[derive(Clone)]
pub struct ChatService {
    store: Arc<DatasetStore>,
    provider: Arc<dyn InferenceProvider>,
}

impl ChatService {
    pub fn new(store: Arc<DatasetStore>, provider: Arc<dyn InferenceProvider>) -> Self {
        Self { store, provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Answer `message`.
    ///
    /// The model is not called when the dataset is unavailable. Any failure
    /// after that point is reported as [`ChatError::Processing`] and logged
    /// here with full detail.
    pub async fn reply(&self, message: &str) -> Result<Completion, ChatError> {
        let dataset = self.store.get().await?;

        let answer = async {
            let context = context::format_context(&dataset)?;
            let messages = build_messages(message, context);
            Ok::<_, ChatError>(self.provider.invoke(&messages).await?)
        }
        .await
        .inspect_err(|e| error!(provider = self.provider.name(), error = %e, "error processing chat request"))?;

        debug!(content = %answer.content, "model response");

        if mentions_grants(message) {
            Ok(answer)
        } else {
            Ok(Completion {
                content: CANNED_GREETING.to_string(),
            })
        }
    }
}
