//! Text-generation capability for VoxBridge
//!
//! A uniform request shape, one adapter per vendor (OpenAI, Mistral,
//! Ollama), and the normalization that turns each vendor's response into a
//! plain [`GenerationResult`]. Vendor selection happens elsewhere; this
//! crate only knows how to talk to each vendor.

pub mod config;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod prompt;
pub mod providers;

pub use config::LlmConfig;
pub use error::GenerationError;
pub use ports::{GenerationRequest, GenerationResult, TextGenerator};
pub use providers::{MistralGenerator, OllamaGenerator, OpenAiGenerator, build_generator};
