//! Audio formats and speech request/response types

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use domain::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Audio container formats the bridge can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG layer III audio
    #[default]
    Mp3,
    /// RIFF/WAVE audio
    Wav,
    /// Ogg container audio
    Ogg,
}

impl AudioFormat {
    /// All formats the bridge knows about
    pub const ALL: [Self; 3] = [Self::Mp3, Self::Wav, Self::Ogg];

    /// The MIME type to serve this format under
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
        }
    }

    /// File extension, also the vendor-facing format name
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
        }
    }
}

impl FromStr for AudioFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            "ogg" => Ok(Self::Ogg),
            other => Err(DomainError::validation(format!(
                "unknown audio format: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A normalized speech-synthesis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// The text to speak
    pub text: String,
    /// Language of the text, e.g. `sv`
    #[serde(default = "default_language")]
    pub language: String,
    /// Vendor-specific voice identifier; adapters fall back to their
    /// configured default
    #[serde(default)]
    pub voice: Option<String>,
    /// Desired audio format
    #[serde(default)]
    pub format: AudioFormat,
}

fn default_language() -> String {
    "sv".to_string()
}

impl SpeechRequest {
    /// Create a request with default language, voice and format
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: default_language(),
            voice: None,
            format: AudioFormat::default(),
        }
    }

    /// Set the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set a specific voice
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Set the audio format
    #[must_use]
    pub const fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Whether the text carries any content worth speaking
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Synthesized audio, decoded to raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechResult {
    /// The audio payload
    #[serde(with = "base64_bytes")]
    pub audio: Vec<u8>,
    /// Format of the payload
    pub format: AudioFormat,
}

impl SpeechResult {
    /// Wrap synthesized audio
    #[must_use]
    pub const fn new(audio: Vec<u8>, format: AudioFormat) -> Self {
        Self { audio, format }
    }

    /// The MIME type to serve this audio under
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// The audio as standard base64, for JSON responses
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.audio)
    }

    /// Payload size in bytes
    #[must_use]
    pub const fn size_bytes(&self) -> usize {
        self.audio.len()
    }
}

/// Serde helper storing audio as base64 so cached results stay valid JSON
mod base64_bytes {
    use super::BASE64;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded).map_err(serde::de::Error::custom)
    }
}
