//! Vendor adapters for text generation

mod mistral;
mod ollama;
mod openai;

pub use mistral::MistralGenerator;
pub use ollama::OllamaGenerator;
pub use openai::OpenAiGenerator;

use std::sync::Arc;

use domain::LlmVendor;

use crate::config::LlmConfig;
use crate::error::GenerationError;
use crate::ports::TextGenerator;

/// Build the adapter for a vendor
///
/// Construction only wires up the HTTP client; a missing credential is
/// reported on the first call, not here.
pub fn build_generator(
    vendor: LlmVendor,
    config: LlmConfig,
) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    Ok(match vendor {
        LlmVendor::OpenAI => Arc::new(OpenAiGenerator::new(config)?),
        LlmVendor::Mistral => Arc::new(MistralGenerator::new(config)?),
        LlmVendor::Ollama => Arc::new(OllamaGenerator::new(config)?),
    })
}
