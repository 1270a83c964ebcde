//! OpenAI chat-completions adapter

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

/// Talks to the OpenAI `/chat/completions` endpoint
pub struct OpenAiGenerator {
    client: Client,
    config: LlmConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl OpenAiGenerator {
    /// Create the adapter with the configured timeout
    pub fn new(config: LlmConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GenerationError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        self.config
            .openai_api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GenerationError::MissingCredential(LlmVendor::OpenAI.to_string()))
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.openai_base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    #[instrument(skip(self, request), fields(model = %self.config.openai_model))]
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let api_key = self.api_key()?;
        let system = prompt::build_system_prompt(
            request.tone_level,
            request.target_minutes,
            &request.language,
        );
        let body = ChatRequest {
            model: &self.config.openai_model,
            temperature: prompt::temperature_for(request.tone_level),
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage { role: "system", content: &system },
                ChatMessage { role: "user", content: &request.prompt },
            ],
        };

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status.as_u16(), detail));
        }

        let bytes = response.bytes().await?;
        let text = normalize::chat_completion_text(&bytes)?;
        debug!(chars = text.len(), "openai completion received");
        Ok(GenerationResult { text })
    }

    fn vendor(&self) -> LlmVendor {
        LlmVendor::OpenAI
    }

    fn model(&self) -> &str {
        &self.config.openai_model
    }
}
