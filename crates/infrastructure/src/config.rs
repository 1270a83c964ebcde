//! Environment-driven configuration
//!
//! Everything comes from flat environment variables. Values are gathered
//! with the `config` crate and then validated into typed settings; an
//! unknown vendor name or unparsable number fails startup instead of
//! surfacing mid-request.

use std::str::FromStr;

use ai_speech::{AudioFormat, SynthesisConfig};
use ai_text::LlmConfig;
use domain::{LlmVendor, TtsVendor};
use serde::Deserialize;
use thiserror::Error;

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment source itself could not be read
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    /// A variable was present but unusable
    #[error("Invalid {key}: {reason}")]
    Invalid {
        /// The environment variable at fault
        key: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

/// Raw environment variables before validation
#[derive(Debug, Default, Deserialize)]
struct RawEnv {
    host: Option<String>,
    port: Option<String>,
    allowed_origins: Option<String>,
    auth_token: Option<String>,
    rate_limit_rpm: Option<String>,
    llm_provider: Option<String>,
    tts_provider: Option<String>,
    openai_api_key: Option<String>,
    openai_base_url: Option<String>,
    openai_model: Option<String>,
    openai_tts_model: Option<String>,
    openai_tts_voice: Option<String>,
    mistral_api_key: Option<String>,
    mistral_model: Option<String>,
    ollama_url: Option<String>,
    ollama_model: Option<String>,
    elevenlabs_api_key: Option<String>,
    elevenlabs_voice_id: Option<String>,
    coqui_url: Option<String>,
    coqui_speaker: Option<String>,
    tts_format: Option<String>,
    llm_timeout_ms: Option<String>,
    tts_timeout_ms: Option<String>,
    llm_max_tokens: Option<String>,
    cache_ttl_secs: Option<String>,
    cache_max_mb: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Origins allowed by CORS; empty means allow everything
    pub allowed_origins: Vec<String>,
    /// Bearer token required on capability routes, if set
    pub auth_token: Option<String>,
    /// Per-client request budget per minute, if set
    pub rate_limit_rpm: Option<u32>,
}

/// Cache sizing
#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
    /// Capacity bound in megabytes
    pub max_mb: u64,
}

/// Fully validated application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// The text-generation vendor asked for in the environment
    pub llm_provider: LlmVendor,
    /// The speech-synthesis vendor asked for in the environment
    pub tts_provider: TtsVendor,
    /// Text-generation adapter settings
    pub llm: LlmConfig,
    /// Speech-synthesis adapter settings
    pub tts: SynthesisConfig,
    /// Cache sizing
    pub cache: CacheSettings,
}

fn parse<T: FromStr>(value: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Load and validate configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let raw: RawEnv = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawEnv) -> Result<Self, ConfigError> {
        let llm_provider = parse::<LlmVendor>(raw.llm_provider, "LLM_PROVIDER")?.unwrap_or_default();
        let tts_provider = parse::<TtsVendor>(raw.tts_provider, "TTS_PROVIDER")?.unwrap_or_default();

        let server = ServerConfig {
            host: non_empty(raw.host).unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(raw.port, "PORT")?.unwrap_or(10_000),
            allowed_origins: raw
                .allowed_origins
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToString::to_string)
                .collect(),
            auth_token: non_empty(raw.auth_token),
            rate_limit_rpm: parse(raw.rate_limit_rpm, "RATE_LIMIT_RPM")?,
        };

        let mut llm = LlmConfig {
            openai_api_key: non_empty(raw.openai_api_key.clone()),
            mistral_api_key: non_empty(raw.mistral_api_key),
            ollama_url: non_empty(raw.ollama_url),
            ..LlmConfig::default()
        };
        if let Some(base) = non_empty(raw.openai_base_url.clone()) {
            llm.openai_base_url = base;
        }
        if let Some(model) = non_empty(raw.openai_model) {
            llm.openai_model = model;
        }
        if let Some(model) = non_empty(raw.mistral_model) {
            llm.mistral_model = model;
        }
        if let Some(model) = non_empty(raw.ollama_model) {
            llm.ollama_model = model;
        }
        if let Some(timeout) = parse(raw.llm_timeout_ms, "LLM_TIMEOUT_MS")? {
            llm.timeout_ms = timeout;
        }
        if let Some(max_tokens) = parse(raw.llm_max_tokens, "LLM_MAX_TOKENS")? {
            llm.max_tokens = max_tokens;
        }

        let mut tts = SynthesisConfig {
            openai_api_key: non_empty(raw.openai_api_key),
            elevenlabs_api_key: non_empty(raw.elevenlabs_api_key),
            coqui_url: non_empty(raw.coqui_url),
            coqui_speaker: non_empty(raw.coqui_speaker),
            ..SynthesisConfig::default()
        };
        if let Some(base) = non_empty(raw.openai_base_url) {
            tts.openai_base_url = base;
        }
        if let Some(model) = non_empty(raw.openai_tts_model) {
            tts.openai_model = model;
        }
        if let Some(voice) = non_empty(raw.openai_tts_voice) {
            tts.openai_voice = voice;
        }
        if let Some(voice_id) = non_empty(raw.elevenlabs_voice_id) {
            tts.elevenlabs_voice_id = voice_id;
        }
        if let Some(format) = parse::<AudioFormat>(raw.tts_format, "TTS_FORMAT")? {
            tts.output_format = format;
        }
        if let Some(timeout) = parse(raw.tts_timeout_ms, "TTS_TIMEOUT_MS")? {
            tts.timeout_ms = timeout;
        }

        let cache = CacheSettings {
            ttl_secs: parse(raw.cache_ttl_secs, "CACHE_TTL_SECS")?.unwrap_or(3600),
            max_mb: parse(raw.cache_max_mb, "CACHE_MAX_MB")?.unwrap_or(64),
        };

        Ok(Self {
            server,
            llm_provider,
            tts_provider,
            llm,
            tts,
            cache,
        })
    }
}
