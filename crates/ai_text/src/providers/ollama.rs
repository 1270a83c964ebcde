//! Ollama adapter
//!
//! Ollama's `/api/generate` takes a single prompt string, so the system
//! instruction is folded in front of the user's prompt.

use std::time::Duration;

use async_trait::async_trait;
use domain::LlmVendor;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::LlmConfig;
use crate::error::GenerationError;
use crate::normalize;
use crate::ports::{GenerationRequest, GenerationResult, TextGenerator};
use crate::prompt;

/// Talks to a self-hosted Ollama server
pub struct OllamaGenerator {
    client: Client,
    config: LlmConfig,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

impl OllamaGenerator {
    /// Create the adapter with the configured timeout
    pub fn new(config: LlmConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn base_url(&self) -> Result<&str, GenerationError> {
        self.config
            .ollama_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| GenerationError::MissingCredential(LlmVendor::Ollama.to_string()))
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    #[instrument(skip(self, request), fields(model = %self.config.ollama_model))]
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let base_url = self.base_url()?;
        let system = prompt::build_system_prompt(
            request.tone_level,
            request.target_minutes,
            &request.language,
        );
        let body = GenerateRequest {
            model: &self.config.ollama_model,
            prompt: format!("{system}\n\n{}", request.prompt),
            stream: false,
            options: GenerateOptions {
                temperature: prompt::temperature_for(request.tone_level),
                num_predict: self.config.max_tokens,
            },
        };
        let url = format!("{}/api/generate", base_url.trim_end_matches('/'));

        let response = self.client.post(url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status.as_u16(), detail));
        }

        let bytes = response.bytes().await?;
        let text = normalize::ollama_generate_text(&bytes)?;
        debug!(chars = text.len(), "ollama generation received");
        Ok(GenerationResult { text })
    }

    fn vendor(&self) -> LlmVendor {
        LlmVendor::Ollama
    }

    fn model(&self) -> &str {
        &self.config.ollama_model
    }
}
