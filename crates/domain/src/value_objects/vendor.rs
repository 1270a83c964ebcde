//! Vendor identifiers
//!
//! Closed enums for the providers each capability can talk to. Unknown
//! vendor names are rejected when configuration is loaded, not at request
//! time, so a typo in `LLM_PROVIDER` fails the process start.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::DomainError;

/// The two capabilities the bridge exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Text generation
    Llm,
    /// Speech synthesis
    Tts,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Llm => write!(f, "llm"),
            Self::Tts => write!(f, "tts"),
        }
    }
}

/// Text-generation vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmVendor {
    /// OpenAI chat completions (default fallback)
    #[default]
    OpenAI,
    /// Mistral AI chat completions
    Mistral,
    /// Self-hosted Ollama server
    Ollama,
}

impl LlmVendor {
    /// All vendors, in fallback-preference order
    pub const ALL: [Self; 3] = [Self::OpenAI, Self::Mistral, Self::Ollama];
}

impl FromStr for LlmVendor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "mistral" => Ok(Self::Mistral),
            "ollama" => Ok(Self::Ollama),
            other => Err(DomainError::UnknownVendor {
                capability: "llm",
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for LlmVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Mistral => write!(f, "mistral"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

/// Speech-synthesis vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TtsVendor {
    /// OpenAI speech endpoint (default fallback)
    #[default]
    OpenAI,
    /// ElevenLabs text-to-speech
    ElevenLabs,
    /// Self-hosted Coqui XTTS server
    Coqui,
}

impl TtsVendor {
    /// All vendors, in fallback-preference order
    pub const ALL: [Self; 3] = [Self::OpenAI, Self::ElevenLabs, Self::Coqui];
}

impl FromStr for TtsVendor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "elevenlabs" => Ok(Self::ElevenLabs),
            "coqui" => Ok(Self::Coqui),
            other => Err(DomainError::UnknownVendor {
                capability: "tts",
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for TtsVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::ElevenLabs => write!(f, "elevenlabs"),
            Self::Coqui => write!(f, "coqui"),
        }
    }
}
