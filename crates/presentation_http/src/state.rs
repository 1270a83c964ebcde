//! Shared request state

use std::sync::Arc;

use ai_speech::AudioFormat;
use application::{Gateway, llm_available, tts_available};
use domain::{LlmVendor, TtsVendor};
use infrastructure::AppConfig;

/// What `/status` reports about the running bridge
#[derive(Debug, Clone)]
pub struct StatusInfo {
    /// Selected text-generation vendor
    pub llm_provider: LlmVendor,
    /// Text-generation model in use
    pub llm_model: String,
    /// Whether the selected text-generation vendor is credentialed
    pub llm_has_key: bool,
    /// Selected speech-synthesis vendor
    pub tts_provider: TtsVendor,
    /// Speech-synthesis model in use
    pub tts_model: String,
    /// Default voice
    pub tts_voice: String,
    /// Default audio format
    pub tts_format: AudioFormat,
    /// Whether the selected speech-synthesis vendor is credentialed
    pub tts_has_key: bool,
    /// Configured CORS allow-list
    pub allowed_origins: Vec<String>,
}

impl StatusInfo {
    /// Describe the bridge as wired up at startup
    #[must_use]
    pub fn describe(config: &AppConfig, gateway: &Gateway) -> Self {
        Self {
            llm_provider: gateway.llm_vendor(),
            llm_model: gateway.llm_model().to_string(),
            llm_has_key: llm_available(gateway.llm_vendor(), &config.llm),
            tts_provider: gateway.tts_vendor(),
            tts_model: gateway.tts_model().to_string(),
            tts_voice: gateway.tts_voice().to_string(),
            tts_format: config.tts.output_format,
            tts_has_key: tts_available(gateway.tts_vendor(), &config.tts),
            allowed_origins: config.server.allowed_origins.clone(),
        }
    }
}

/// State shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// The capability gateway
    pub gateway: Arc<Gateway>,
    /// Startup facts for `/status`
    pub status: Arc<StatusInfo>,
    /// Format used when a speech request does not name one
    pub default_format: AudioFormat,
}

impl AppState {
    /// Bundle the gateway with its startup description
    #[must_use]
    pub fn new(gateway: Arc<Gateway>, status: StatusInfo) -> Self {
        let default_format = status.tts_format;
        Self {
            gateway,
            status: Arc::new(status),
            default_format,
        }
    }
}
