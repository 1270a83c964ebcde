//! Vendor selection
//!
//! Selection is a pure function over the configuration, evaluated once at
//! startup. A vendor counts as available when its credential or endpoint
//! is configured; whether that credential actually works is only known at
//! call time. When the configured vendor is unavailable the bridge falls
//! back to OpenAI rather than refusing to start.

use ai_speech::SynthesisConfig;
use ai_text::LlmConfig;
use domain::{LlmVendor, TtsVendor};
use tracing::warn;

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Whether a text-generation vendor has what it needs to be called
#[must_use]
pub fn llm_available(vendor: LlmVendor, config: &LlmConfig) -> bool {
    match vendor {
        LlmVendor::OpenAI => present(config.openai_api_key.as_deref()),
        LlmVendor::Mistral => present(config.mistral_api_key.as_deref()),
        LlmVendor::Ollama => present(config.ollama_url.as_deref()),
    }
}

/// Whether a speech-synthesis vendor has what it needs to be called
#[must_use]
pub fn tts_available(vendor: TtsVendor, config: &SynthesisConfig) -> bool {
    match vendor {
        TtsVendor::OpenAI => present(config.openai_api_key.as_deref()),
        TtsVendor::ElevenLabs => present(config.elevenlabs_api_key.as_deref()),
        TtsVendor::Coqui => present(config.coqui_url.as_deref()),
    }
}

/// Pick the text-generation vendor to serve requests with
///
/// Never fails; an unconfigured fallback surfaces as a credential error
/// on the first request instead.
#[must_use]
pub fn select_llm(configured: LlmVendor, config: &LlmConfig) -> LlmVendor {
    if llm_available(configured, config) || configured == LlmVendor::OpenAI {
        configured
    } else {
        warn!(
            configured = %configured,
            "llm vendor not configured, falling back to openai"
        );
        LlmVendor::OpenAI
    }
}

/// Pick the speech-synthesis vendor to serve requests with
#[must_use]
pub fn select_tts(configured: TtsVendor, config: &SynthesisConfig) -> TtsVendor {
    if tts_available(configured, config) || configured == TtsVendor::OpenAI {
        configured
    } else {
        warn!(
            configured = %configured,
            "tts vendor not configured, falling back to openai"
        );
        TtsVendor::OpenAI
    }
}
