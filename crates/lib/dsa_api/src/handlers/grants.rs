//! Grants request handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::GrantsResponse;

/// `GET /api/grants` — the loaded dataset, loading it first if needed.
pub async fn list_grants_handler(State(state): State<AppState>) -> AppResult<Json<GrantsResponse>> {
    let dataset = state.store.get().await?;
    Ok(Json(GrantsResponse {
        granter_grants: dataset.granter_grants().to_vec(),
        grantee_grants: dataset.grantee_grants().to_vec(),
    }))
}
