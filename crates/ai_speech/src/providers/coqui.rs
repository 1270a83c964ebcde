//! Coqui XTTS adapter
//!
//! Self-hosted Coqui servers differ in which field carries the audio, so
//! the response is probed through a fixed list of known field names. A 2xx
//! with none of them is a malformed response, never silently empty audio.

use std::time::Duration;

use async_trait::async_trait;
use domain::TtsVendor;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::SynthesisConfig;
use crate::error::SynthesisError;
use crate::normalize;
use crate::ports::SpeechSynthesizer;
use crate::types::{AudioFormat, SpeechRequest, SpeechResult};

/// Talks to a self-hosted Coqui XTTS server
pub struct CoquiSynthesizer {
    client: Client,
    config: SynthesisConfig,
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    text: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speaker: Option<&'a str>,
}

/// The audio field names Coqui deployments have been seen using, in
/// probe order
#[derive(Debug, Deserialize)]
struct CoquiPayload {
    audio_base64: Option<String>,
    wav_base64: Option<String>,
    base64: Option<String>,
    audio: Option<String>,
}

impl CoquiPayload {
    fn into_base64(self) -> Option<String> {
        self.audio_base64
            .or(self.wav_base64)
            .or(self.base64)
            .or(self.audio)
    }
}

impl CoquiSynthesizer {
    /// Create the adapter with the configured timeout
    pub fn new(config: SynthesisConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SynthesisError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> Result<&str, SynthesisError> {
        self.config
            .coqui_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| SynthesisError::MissingCredential(TtsVendor::Coqui.to_string()))
    }
}

#[async_trait]
impl SpeechSynthesizer for CoquiSynthesizer {
    #[instrument(skip(self, request))]
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechResult, SynthesisError> {
        if request.format != AudioFormat::Wav {
            return Err(SynthesisError::UnsupportedFormat {
                vendor: TtsVendor::Coqui,
                format: request.format,
            });
        }
        let endpoint = self.endpoint()?;
        let speaker = request
            .voice
            .as_deref()
            .or(self.config.coqui_speaker.as_deref());
        let body = SpeechBody {
            text: &request.text,
            language: &request.language,
            speaker,
        };

        let response = self.client.post(endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::from_status(status.as_u16(), detail));
        }

        let payload: CoquiPayload = response.json().await.map_err(|e| {
            SynthesisError::MalformedResponse(format!("invalid synthesis body: {e}"))
        })?;
        let encoded = payload.into_base64().ok_or_else(|| {
            SynthesisError::MalformedResponse(
                "synthesis body carries no recognized audio field".to_string(),
            )
        })?;
        let audio = normalize::decode_base64_audio(&encoded)?;
        debug!(bytes = audio.len(), "coqui audio received");
        Ok(SpeechResult::new(audio, AudioFormat::Wav))
    }

    fn vendor(&self) -> TtsVendor {
        TtsVendor::Coqui
    }

    fn model(&self) -> &str {
        "xtts"
    }

    fn default_voice(&self) -> &str {
        self.config.coqui_speaker.as_deref().unwrap_or("default")
    }
}
