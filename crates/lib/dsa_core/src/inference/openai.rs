//! OpenAI-compatible chat completions provider.
//!
//! Calls `POST {base_url}/v1/chat/completions` and returns the first
//! choice's message content.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::config::InferenceConfig;
use super::{ChatMessage, Completion, InferenceError, InferenceProvider, WireMessage, wire_messages};

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

pub struct OpenAiProvider {
    client: Client,
    config: InferenceConfig,
    api_key: String,
}

impl OpenAiProvider {
    /// Fails when no API key is configured.
    pub fn new(client: Client, config: InferenceConfig) -> Result<Self, InferenceError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            InferenceError::Config("INFERENCE_API_KEY is required for openai provider".to_string())
        })?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }
}

#[async_trait]
impl InferenceProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn invoke(&self, messages: &[ChatMessage]) -> Result<Completion, InferenceError> {
        let resp = self
            .client
            .post(self.config.endpoint("/v1/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&OpenAIRequest {
                model: &self.config.model,
                messages: wire_messages(messages),
                temperature: self.config.temperature,
                stream: false,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(InferenceError::Upstream { status, body });
        }

        let data: OpenAIResponse = resp
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(format!("OpenAI response parse error: {e}")))?;

        let choice = data.choices.into_iter().next().ok_or_else(|| {
            InferenceError::InvalidResponse("OpenAI returned empty choices array".to_string())
        })?;

        Ok(Completion {
            content: choice.message.content.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;

    type Seen = Arc<Mutex<Option<(Value, Option<String>)>>>;

    async fn upstream(status: StatusCode, reply: Value) -> (String, Seen) {
        let seen: Seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let sink = sink.clone();
                let reply = reply.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *sink.lock().unwrap() = Some((body, auth));
                    (status, Json(reply))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}/"), seen)
    }

    fn provider(base_url: String) -> OpenAiProvider {
        OpenAiProvider::new(
            Client::new(),
            InferenceConfig {
                provider: "openai".into(),
                base_url,
                model: "gpt-4o-mini".into(),
                api_key: Some("sk-test".into()),
                temperature: 0.5,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let (base, seen) = upstream(
            StatusCode::OK,
            json!({"choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]}),
        )
        .await;

        let completion = provider(base)
            .invoke(&[ChatMessage::human("permissions?"), ChatMessage::system("context")])
            .await
            .unwrap();
        assert_eq!(completion.content, "first");

        let (body, auth) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][1]["role"], "system");
    }

    #[tokio::test]
    async fn null_content_reads_as_empty() {
        let (base, _) = upstream(
            StatusCode::OK,
            json!({"choices": [{"message": {"role": "assistant", "content": null}}]}),
        )
        .await;
        let completion = provider(base).invoke(&[ChatMessage::human("hi")]).await.unwrap();
        assert_eq!(completion.content, "");
    }

    #[tokio::test]
    async fn empty_choices_is_invalid_response() {
        let (base, _) = upstream(StatusCode::OK, json!({"choices": []})).await;
        let err = provider(base).invoke(&[ChatMessage::human("hi")]).await.unwrap_err();
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn error_status_is_upstream_error() {
        let (base, _) = upstream(StatusCode::UNAUTHORIZED, json!({"error": {"message": "bad key"}})).await;
        let err = provider(base).invoke(&[ChatMessage::human("hi")]).await.unwrap_err();
        assert!(matches!(err, InferenceError::Upstream { status: 401, .. }));
    }
}
