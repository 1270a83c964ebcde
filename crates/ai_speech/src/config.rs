//! Speech-synthesis configuration

use serde::{Deserialize, Serialize};

use crate::types::AudioFormat;

/// Settings shared by all speech-synthesis adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    /// OpenAI speech model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// OpenAI voice name
    #[serde(default = "default_openai_voice")]
    pub openai_voice: String,
    /// ElevenLabs API key
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,
    /// ElevenLabs API base URL
    #[serde(default = "default_elevenlabs_base_url")]
    pub elevenlabs_base_url: String,
    /// ElevenLabs voice identifier
    #[serde(default = "default_elevenlabs_voice")]
    pub elevenlabs_voice_id: String,
    /// Endpoint of a self-hosted Coqui XTTS server
    #[serde(default)]
    pub coqui_url: Option<String>,
    /// Coqui speaker name
    #[serde(default)]
    pub coqui_speaker: Option<String>,
    /// Default output format when the request does not name one
    #[serde(default)]
    pub output_format: AudioFormat,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini-tts".to_string()
}

fn default_openai_voice() -> String {
    "alloy".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_elevenlabs_voice() -> String {
    "EXAVITQu4vr4xnSDxMaL".to_string()
}

fn default_timeout_ms() -> u64 {
    180_000
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            openai_voice: default_openai_voice(),
            elevenlabs_api_key: None,
            elevenlabs_base_url: default_elevenlabs_base_url(),
            elevenlabs_voice_id: default_elevenlabs_voice(),
            coqui_url: None,
            coqui_speaker: None,
            output_format: AudioFormat::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
