//! Speech-synthesis capability for VoxBridge
//!
//! Adapters for OpenAI speech, ElevenLabs and a self-hosted Coqui server,
//! all returning raw audio bytes tagged with their format. Vendors that
//! hand audio back as base64 are decoded here so callers never see the
//! wire encoding.

pub mod config;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SynthesisConfig;
pub use error::SynthesisError;
pub use ports::SpeechSynthesizer;
pub use providers::{CoquiSynthesizer, ElevenLabsSynthesizer, OpenAiSynthesizer, build_synthesizer};
pub use types::{AudioFormat, SpeechRequest, SpeechResult};
