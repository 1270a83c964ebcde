//! Text-generation endpoint

use ai_text::GenerationRequest;
use axum::Json;
use axum::extract::State;
use domain::ToneLevel;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /llm` and its aliases
#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    /// The story prompt
    #[serde(default)]
    pub prompt: Option<String>,
    /// Tone level 1-5; `lvl` and `toneLevel` are accepted for
    /// compatibility with older clients
    #[serde(default, alias = "lvl", alias = "toneLevel")]
    pub tone_level: Option<u8>,
    /// Target listening length in minutes
    #[serde(default, alias = "minutes")]
    pub target_minutes: Option<f32>,
    /// Output language
    #[serde(default, alias = "lang")]
    pub language: Option<String>,
}

/// Response body for a successful generation
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    ok: bool,
    cached: bool,
    text: String,
}

/// `POST /llm`
#[instrument(skip(state, body))]
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = body.prompt.unwrap_or_default();
    if prompt.trim().is_empty() {
        return Err(ApiError::InvalidRequest("prompt is required".to_string()));
    }

    let request = GenerationRequest::new(prompt)
        .with_tone(ToneLevel::new(body.tone_level.unwrap_or(3)))
        .with_minutes(body.target_minutes.unwrap_or(3.0))
        .with_language(body.language.unwrap_or_else(|| "sv".to_string()));

    let result = state.gateway.handle_generate(request).await?;
    Ok(Json(GenerateResponse {
        ok: true,
        cached: result.cached,
        text: result.value.text,
    }))
}
