//! ElevenLabs adapter
//!
//! Authenticates with an `xi-api-key` header and only produces mp3.

use std::time::Duration;

use async_trait::async_trait;
use domain::TtsVendor;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::SynthesisConfig;
use crate::error::SynthesisError;
use crate::ports::SpeechSynthesizer;
use crate::types::{AudioFormat, SpeechRequest, SpeechResult};

const STABILITY: f32 = 0.3;
const SIMILARITY_BOOST: f32 = 0.7;

/// Talks to the ElevenLabs text-to-speech endpoint
pub struct ElevenLabsSynthesizer {
    client: Client,
    config: SynthesisConfig,
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    text: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl ElevenLabsSynthesizer {
    /// Create the adapter with the configured timeout
    pub fn new(config: SynthesisConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SynthesisError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, SynthesisError> {
        self.config
            .elevenlabs_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SynthesisError::MissingCredential(TtsVendor::ElevenLabs.to_string()))
    }

    fn speech_url(&self, voice_id: &str) -> String {
        format!(
            "{}/text-to-speech/{voice_id}",
            self.config.elevenlabs_base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    #[instrument(skip(self, request))]
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechResult, SynthesisError> {
        if request.format != AudioFormat::Mp3 {
            return Err(SynthesisError::UnsupportedFormat {
                vendor: TtsVendor::ElevenLabs,
                format: request.format,
            });
        }
        let api_key = self.api_key()?;
        let voice_id = request
            .voice
            .as_deref()
            .unwrap_or(&self.config.elevenlabs_voice_id);
        let body = SpeechBody {
            text: &request.text,
            voice_settings: VoiceSettings {
                stability: STABILITY,
                similarity_boost: SIMILARITY_BOOST,
            },
        };

        let response = self
            .client
            .post(self.speech_url(voice_id))
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::from_status(status.as_u16(), detail));
        }

        let audio = response.bytes().await?.to_vec();
        debug!(bytes = audio.len(), voice = voice_id, "elevenlabs audio received");
        Ok(SpeechResult::new(audio, AudioFormat::Mp3))
    }

    fn vendor(&self) -> TtsVendor {
        TtsVendor::ElevenLabs
    }

    fn model(&self) -> &str {
        "eleven_multilingual_v2"
    }

    fn default_voice(&self) -> &str {
        &self.config.elevenlabs_voice_id
    }
}
