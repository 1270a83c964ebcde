//! Route table

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::ApiError;
use crate::handlers::{generate, speak, status};
use crate::state::AppState;

/// Unknown routes answer with the same JSON error envelope as everything
/// else
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Build the router
///
/// `/generate` and `/episodes/generate` are aliases of `/llm` kept for
/// clients of earlier deployments.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status::status))
        .route("/llm", post(generate::generate))
        .route("/generate", post(generate::generate))
        .route("/episodes/generate", post(generate::generate))
        .route("/tts", post(speak::speak))
        .fallback(not_found)
        .with_state(state)
}
