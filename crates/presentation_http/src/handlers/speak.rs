//! Speech-synthesis endpoint
//!
//! Replies with base64 JSON by default; clients that send an `audio/*`
//! Accept header get the raw bytes with the matching content type.

use ai_speech::{AudioFormat, SpeechRequest};
use axum::Json;
use axum::extract::State;
use axum::http::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /tts`
#[derive(Debug, Deserialize)]
pub struct SpeakBody {
    /// The text to speak
    #[serde(default)]
    pub text: Option<String>,
    /// Language of the text
    #[serde(default, alias = "lang")]
    pub language: Option<String>,
    /// Vendor-specific voice identifier
    #[serde(default)]
    pub voice: Option<String>,
    /// Desired audio format
    #[serde(default)]
    pub format: Option<AudioFormat>,
}

/// Response body for a successful synthesis
#[derive(Debug, Serialize)]
pub struct SpeakResponse {
    ok: bool,
    cached: bool,
    audio: AudioBody,
}

#[derive(Debug, Serialize)]
struct AudioBody {
    format: String,
    mime: &'static str,
    base64: String,
}

fn wants_raw_audio(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("audio/"))
}

/// `POST /tts`
#[instrument(skip(state, headers, body))]
pub async fn speak(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SpeakBody>,
) -> Result<Response, ApiError> {
    let text = body.text.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ApiError::InvalidRequest("text is required".to_string()));
    }

    let mut request = SpeechRequest::new(text)
        .with_language(body.language.unwrap_or_else(|| "sv".to_string()))
        .with_format(body.format.unwrap_or(state.default_format));
    if let Some(voice) = body.voice.filter(|voice| !voice.trim().is_empty()) {
        request = request.with_voice(voice);
    }

    let result = state.gateway.handle_speak(request).await?;
    let audio = result.value;

    if wants_raw_audio(&headers) {
        let mime = audio.mime_type();
        return Ok(([(CONTENT_TYPE, mime)], Bytes::from(audio.audio)).into_response());
    }

    Ok(Json(SpeakResponse {
        ok: true,
        cached: result.cached,
        audio: AudioBody {
            format: audio.format.to_string(),
            mime: audio.mime_type(),
            base64: audio.to_base64(),
        },
    })
    .into_response())
}
