//! Gateway errors

use ai_speech::SynthesisError;
use ai_text::GenerationError;
use domain::DomainError;
use thiserror::Error;

/// Errors surfaced by the gateway to the HTTP layer
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The caller's request is unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Text generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Speech synthesis failed
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Something inside the bridge itself went wrong
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for GatewayError {
    fn from(err: DomainError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("cache serialization failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_errors_convert_transparently() {
        let err: GatewayError = GenerationError::MissingCredential("openai".to_string()).into();
        assert!(matches!(
            err,
            GatewayError::Generation(GenerationError::MissingCredential(_))
        ));
    }

    #[test]
    fn domain_errors_become_invalid_request() {
        let err: GatewayError = DomainError::validation("prompt is required").into();
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }
}
