//! Speech-synthesis port

use async_trait::async_trait;
use domain::TtsVendor;

use crate::error::SynthesisError;
use crate::types::{SpeechRequest, SpeechResult};

/// A speech-synthesis backend
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize audio for the given request
    async fn synthesize(&self, request: SpeechRequest)
    -> Result<SpeechResult, SynthesisError>;

    /// Which vendor this adapter talks to
    fn vendor(&self) -> TtsVendor;

    /// The model or engine the adapter will ask for
    fn model(&self) -> &str;

    /// The voice used when the request does not name one
    fn default_voice(&self) -> &str;
}
