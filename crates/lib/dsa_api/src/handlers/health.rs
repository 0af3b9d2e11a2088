//! Health endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health` — reports version, dataset state, and provider.
///
/// Never triggers a dataset load.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        greeting: dsa_core::greeting(),
        dataset_loaded: state.store.is_loaded(),
        provider: state.chat.provider_name().to_string(),
    })
}
