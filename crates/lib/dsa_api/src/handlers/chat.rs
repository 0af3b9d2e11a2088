//! Chat request handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ChatRequest, ChatResponse};

/// `POST /api/chat` — answer a message using the grants dataset as context.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let completion = state.chat.reply(&body.message).await?;
    Ok(Json(ChatResponse {
        content: completion.content,
    }))
}
