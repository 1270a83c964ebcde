//! Text-generation port and request/response types

use async_trait::async_trait;
use domain::{LlmVendor, ToneLevel};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// A normalized text-generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The user's prompt
    pub prompt: String,
    /// Narrative tone, 1–5
    #[serde(default)]
    pub tone_level: ToneLevel,
    /// Target listening length in minutes
    #[serde(default = "default_minutes")]
    pub target_minutes: f32,
    /// Output language, e.g. `sv` or `en`
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_minutes() -> f32 {
    3.0
}

fn default_language() -> String {
    "sv".to_string()
}

impl GenerationRequest {
    /// Create a request with default tone, length and language
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tone_level: ToneLevel::default(),
            target_minutes: default_minutes(),
            language: default_language(),
        }
    }

    /// Set the tone level
    #[must_use]
    pub const fn with_tone(mut self, tone: ToneLevel) -> Self {
        self.tone_level = tone;
        self
    }

    /// Set the target length in minutes
    #[must_use]
    pub const fn with_minutes(mut self, minutes: f32) -> Self {
        self.target_minutes = minutes;
        self
    }

    /// Set the output language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Whether the prompt carries any content worth forwarding
    #[must_use]
    pub fn has_prompt(&self) -> bool {
        !self.prompt.trim().is_empty()
    }
}

/// Normalized output of a text-generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The generated text, already trimmed
    pub text: String,
}

impl GenerationResult {
    /// Wrap generated text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the given request
    async fn generate(&self, request: GenerationRequest)
    -> Result<GenerationResult, GenerationError>;

    /// Which vendor this adapter talks to
    fn vendor(&self) -> LlmVendor;

    /// The model the adapter will ask for
    fn model(&self) -> &str;
}
