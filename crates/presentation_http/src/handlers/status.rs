//! Status endpoint
//!
//! Reports which vendors are wired up without revealing any credential,
//! only whether one is present.

use application::CacheStats;
use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Response body for `GET /status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    ok: bool,
    llm: LlmStatus,
    tts: TtsStatus,
    cache: CacheStats,
    cors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LlmStatus {
    provider: String,
    model: String,
    has_key: bool,
}

#[derive(Debug, Serialize)]
struct TtsStatus {
    provider: String,
    model: String,
    voice: String,
    format: String,
    has_key: bool,
}

/// `GET /status`
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let info = &state.status;
    Json(StatusResponse {
        ok: true,
        llm: LlmStatus {
            provider: info.llm_provider.to_string(),
            model: info.llm_model.clone(),
            has_key: info.llm_has_key,
        },
        tts: TtsStatus {
            provider: info.tts_provider.to_string(),
            model: info.tts_model.clone(),
            voice: info.tts_voice.clone(),
            format: info.tts_format.to_string(),
            has_key: info.tts_has_key,
        },
        cache: state.gateway.cache_stats().await,
        cors: info.allowed_origins.clone(),
    })
}
