//! # dsa_api
//!
//! HTTP API library for the DSA chat relay.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use dsa_core::chat::ChatService;
use dsa_core::grants::store::DatasetStore;
use dsa_core::inference::InferenceProvider;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{chat, grants, health};

/// Route paths.
pub mod routes {
    pub const POST_API_CHAT: &str = "/api/chat";
    pub const GET_API_GRANTS: &str = "/api/grants";
    pub const GET_API_HEALTH: &str = "/api/health";
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Grants dataset snapshot, shared with `chat`.
    pub store: Arc<DatasetStore>,
    /// Chat service.
    pub chat: ChatService,
    /// API configuration.
    pub config: ApiConfig,
}

impl AppState {
    /// Build state with a fresh, unloaded dataset store at `config.dataset_path`.
    pub fn new(config: ApiConfig, provider: Arc<dyn InferenceProvider>) -> Self {
        let store = Arc::new(DatasetStore::new(config.dataset_path.clone()));
        Self::with_store(config, store, provider)
    }

    /// Build state around an existing store.
    pub fn with_store(
        config: ApiConfig,
        store: Arc<DatasetStore>,
        provider: Arc<dyn InferenceProvider>,
    ) -> Self {
        Self {
            chat: ChatService::new(store.clone(), provider),
            store,
            config,
        }
    }
}

/// CORS policy: listed origins only, with credentials.
///
/// Methods and headers are mirrored from the preflight request, since
/// wildcards are not allowed alongside credentials.
pub fn cors_layer(config: &ApiConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .route(routes::GET_API_GRANTS, get(grants::list_grants_handler))
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
