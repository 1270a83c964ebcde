//! Vendor adapters for speech synthesis

mod coqui;
mod elevenlabs;
mod openai;

pub use coqui::CoquiSynthesizer;
pub use elevenlabs::ElevenLabsSynthesizer;
pub use openai::OpenAiSynthesizer;

use std::sync::Arc;

use domain::TtsVendor;

use crate::config::SynthesisConfig;
use crate::error::SynthesisError;
use crate::ports::SpeechSynthesizer;

/// Build the adapter for a vendor
///
/// Construction only wires up the HTTP client; a missing credential is
/// reported on the first call, not here.
pub fn build_synthesizer(
    vendor: TtsVendor,
    config: SynthesisConfig,
) -> Result<Arc<dyn SpeechSynthesizer>, SynthesisError> {
    Ok(match vendor {
        TtsVendor::OpenAI => Arc::new(OpenAiSynthesizer::new(config)?),
        TtsVendor::ElevenLabs => Arc::new(ElevenLabsSynthesizer::new(config)?),
        TtsVendor::Coqui => Arc::new(CoquiSynthesizer::new(config)?),
    })
}
