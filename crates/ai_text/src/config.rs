//! Text-generation configuration

use serde::{Deserialize, Serialize};

/// Settings shared by all text-generation adapters
///
/// Every vendor's credential is optional; whichever adapter is actually
/// selected checks for its own at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    /// OpenAI chat model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Mistral API key
    #[serde(default)]
    pub mistral_api_key: Option<String>,
    /// Mistral API base URL
    #[serde(default = "default_mistral_base_url")]
    pub mistral_base_url: String,
    /// Mistral chat model
    #[serde(default = "default_mistral_model")]
    pub mistral_model: String,
    /// Base URL of a self-hosted Ollama server
    #[serde(default)]
    pub ollama_url: Option<String>,
    /// Ollama model name
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Completion token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_mistral_base_url() -> String {
    "https://api.mistral.ai/v1".to_string()
}

fn default_mistral_model() -> String {
    "mistral-small-latest".to_string()
}

fn default_ollama_model() -> String {
    "mistral".to_string()
}

fn default_timeout_ms() -> u64 {
    120_000
}

fn default_max_tokens() -> u32 {
    1_800
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            mistral_api_key: None,
            mistral_base_url: default_mistral_base_url(),
            mistral_model: default_mistral_model(),
            ollama_url: None,
            ollama_model: default_ollama_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
        }
    }
}
