//! OpenAI speech adapter
//!
//! `/audio/speech` returns the audio bytes directly, no envelope.

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

/// Talks to the OpenAI `/audio/speech` endpoint
pub struct OpenAiSynthesizer {
    client: Client,
    config: SynthesisConfig,
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
}

impl OpenAiSynthesizer {
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
            .openai_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SynthesisError::MissingCredential(TtsVendor::OpenAI.to_string()))
    }

    fn speech_url(&self) -> String {
        format!(
            "{}/audio/speech",
            self.config.openai_base_url.trim_end_matches('/')
        )
    }

    const fn check_format(format: AudioFormat) -> Result<(), SynthesisError> {
        match format {
            AudioFormat::Mp3 | AudioFormat::Wav => Ok(()),
            AudioFormat::Ogg => Err(SynthesisError::UnsupportedFormat {
                vendor: TtsVendor::OpenAI,
                format,
            }),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSynthesizer {
    #[instrument(skip(self, request), fields(model = %self.config.openai_model))]
    async fn synthesize(
        &self,
        request: SpeechRequest,
    ) -> Result<SpeechResult, SynthesisError> {
        Self::check_format(request.format)?;
        let api_key = self.api_key()?;
        let voice = request.voice.as_deref().unwrap_or(&self.config.openai_voice);
        let body = SpeechBody {
            model: &self.config.openai_model,
            input: &request.text,
            voice,
            response_format: request.format.extension(),
        };

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::from_status(status.as_u16(), detail));
        }

        let audio = response.bytes().await?.to_vec();
        debug!(bytes = audio.len(), "openai audio received");
        Ok(SpeechResult::new(audio, request.format))
    }

    fn vendor(&self) -> TtsVendor {
        TtsVendor::OpenAI
    }

    fn model(&self) -> &str {
        &self.config.openai_model
    }

    fn default_voice(&self) -> &str {
        &self.config.openai_voice
    }
}
