//! DSA chat relay server binary.
//!
//! Serves `POST /api/chat` until terminated. Configuration comes from CLI
//! flags, the environment, and an optional `.env` file.

use std::sync::Arc;

use clap::Parser;
use dsa_api::config::{ApiConfig, DEFAULT_ALLOWED_ORIGINS};
use dsa_core::grants::loader::DEFAULT_DATASET_PATH;
use dsa_core::grants::store::DatasetStore;
use dsa_core::inference::build_provider;
use dsa_core::inference::config::{DEFAULT_MODEL, DEFAULT_PROVIDER, DEFAULT_TEMPERATURE, InferenceConfig};
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "dsa_api_server", about = "DSA chat relay server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Grants dataset file, relative to the working directory.
    #[arg(long, env = "DATASET_PATH", default_value = DEFAULT_DATASET_PATH)]
    dataset_path: String,

    /// Comma-separated CORS allow-list.
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    allowed_origins: Vec<String>,

    /// Inference provider: `ollama` or `openai`.
    #[arg(long, env = "INFERENCE_PROVIDER", default_value = DEFAULT_PROVIDER)]
    inference_provider: String,

    /// Inference API base URL (defaults per provider).
    #[arg(long, env = "INFERENCE_BASE_URL")]
    inference_base_url: Option<String>,

    /// Model name passed to the provider.
    #[arg(long, env = "INFERENCE_MODEL", default_value = DEFAULT_MODEL)]
    inference_model: String,

    /// Inference API key.
    #[arg(long, env = "INFERENCE_API_KEY", hide_env_values = true)]
    inference_api_key: Option<String>,

    /// Fallback API key, used when `--inference-api-key` is unset or blank.
    #[arg(long, env = "SECRET_AI_API_KEY", hide_env_values = true)]
    secret_ai_api_key: Option<String>,

    /// Sampling temperature.
    #[arg(long, env = "INFERENCE_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    inference_temperature: f32,
}

impl Args {
    fn inference_config(&self) -> InferenceConfig {
        InferenceConfig::new(
            self.inference_provider.clone(),
            self.inference_base_url.clone(),
            self.inference_model.clone(),
            self.inference_api_key.clone(),
            self.secret_ai_api_key.clone(),
            self.inference_temperature,
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,dsa_api=debug,dsa_core=debug")),
        )
        .init();

    let args = Args::parse();
    let config = ApiConfig::new(&args.host, args.port, &args.dataset_path, &args.allowed_origins)?;

    let inference = args.inference_config();
    info!(
        provider = %inference.provider,
        base_url = %inference.base_url,
        model = %inference.model,
        "configuring inference provider"
    );
    let provider = build_provider(&inference)?;

    // Warm the dataset once; a failure here is retried on the first request.
    let store = Arc::new(DatasetStore::new(config.dataset_path.clone()));
    if let Err(e) = store.get().await {
        warn!(error = %e, "grants data not available at startup");
    }

    let state = dsa_api::AppState::with_store(config.clone(), store, provider);
    let app = dsa_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        origins = config.allowed_origins.len(),
        "chat API listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
