//! Cache key derivation
//!
//! Keys are versioned and carry every field that changes the vendor
//! output. The free-text part is hashed over a bounded prefix so that a
//! pathological prompt cannot blow up the key, at the cost of treating
//! prompts that only differ past the bound as identical.

use ai_speech::SpeechRequest;
use ai_text::GenerationRequest;
use domain::{LlmVendor, TtsVendor};

/// How many characters of free text participate in the key hash
const HASH_PREFIX_CHARS: usize = 200;

/// How many hex digits of the hash end up in the key
const HASH_DIGEST_CHARS: usize = 16;

fn hashed_prefix(text: &str) -> String {
    let end = text
        .char_indices()
        .nth(HASH_PREFIX_CHARS)
        .map_or(text.len(), |(index, _)| index);
    let digest = blake3::hash(text[..end].as_bytes()).to_hex();
    digest[..HASH_DIGEST_CHARS].to_string()
}

fn canonical_language(language: &str) -> String {
    language.trim().to_ascii_lowercase()
}

/// Key for a text-generation request served by a given vendor
#[must_use]
pub fn generation_key(vendor: LlmVendor, request: &GenerationRequest) -> String {
    format!(
        "llm:v1:{vendor}:{lang}:t{tone}:m{minutes}:{hash}",
        lang = canonical_language(&request.language),
        tone = request.tone_level,
        minutes = request.target_minutes,
        hash = hashed_prefix(&request.prompt),
    )
}

/// Key for a speech-synthesis request served by a given vendor
#[must_use]
pub fn speech_key(vendor: TtsVendor, request: &SpeechRequest) -> String {
    format!(
        "tts:v1:{vendor}:{lang}:{voice}:{format}:{hash}",
        lang = canonical_language(&request.language),
        voice = request.voice.as_deref().unwrap_or("-"),
        format = request.format,
        hash = hashed_prefix(&request.text),
    )
}
