//! Domain errors

use thiserror::Error;

/// Errors raised by domain validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or malformed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A vendor name did not match any known provider
    #[error("Unknown {capability} vendor: {name}")]
    UnknownVendor {
        /// Capability the vendor was configured for
        capability: &'static str,
        /// The rejected vendor name
        name: String,
    },
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
