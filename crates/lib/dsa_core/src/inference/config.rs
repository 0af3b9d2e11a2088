//! Inference configuration.

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

pub const DEFAULT_PROVIDER: &str = "ollama";
pub const DEFAULT_MODEL: &str = "llama3.1";
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Resolved configuration for the model the chat service talks to.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// Provider name: `"ollama"` or `"openai"`.
    pub provider: String,
    /// API base URL, without the endpoint path.
    pub base_url: String,
    /// Model name passed through to the provider.
    pub model: String,
    /// Bearer key. Required for `"openai"`, optional for `"ollama"`.
    pub api_key: Option<String>,
    pub temperature: f32,
}

impl InferenceConfig {
    /// Default base URL for a provider.
    pub fn default_base_url(provider: &str) -> &'static str {
        match provider {
            "openai" => DEFAULT_OPENAI_BASE_URL,
            _ => DEFAULT_OLLAMA_BASE_URL,
        }
    }

    /// Resolve a config from possibly-unset values.
    ///
    /// `base_url` falls back to the provider's default. Blank keys count as
    /// unset, so an empty `api_key` still falls through to `fallback_api_key`.
    pub fn new(
        provider: impl Into<String>,
        base_url: Option<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        fallback_api_key: Option<String>,
        temperature: f32,
    ) -> Self {
        let provider = provider.into();
        let base_url = base_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| Self::default_base_url(&provider).to_string());
        let api_key = api_key
            .filter(|k| !k.is_empty())
            .or_else(|| fallback_api_key.filter(|k| !k.is_empty()));

        Self {
            provider,
            base_url,
            model: model.into(),
            api_key,
            temperature,
        }
    }

    /// `base_url` joined with `path`, tolerating a trailing slash.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}
