//! Text-generation errors

use thiserror::Error;

/// Errors that can occur while generating text through a vendor
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The selected vendor has no credential/endpoint configured
    #[error("Missing credential for vendor {0}")]
    MissingCredential(String),

    /// Could not reach the vendor at all
    #[error("Vendor unavailable: {0}")]
    Unavailable(String),

    /// Vendor rejected the request (4xx)
    #[error("Vendor rejected the request (status {status}): {detail}")]
    Rejected {
        /// HTTP status returned by the vendor
        status: u16,
        /// Response body, if any
        detail: String,
    },

    /// Vendor-side failure (5xx)
    #[error("Vendor error (status {status}): {detail}")]
    Vendor {
        /// HTTP status returned by the vendor
        status: u16,
        /// Response body, if any
        detail: String,
    },

    /// Call exceeded the configured timeout
    #[error("Vendor timed out after {0}ms")]
    Timeout(u64),

    /// Vendor replied 2xx but the payload was not what we expect
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Classify a non-success vendor status into the error taxonomy
    #[must_use]
    pub fn from_status(status: u16, detail: String) -> Self {
        if (400..500).contains(&status) {
            Self::Rejected { status, detail }
        } else {
            Self::Vendor { status, detail }
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(120_000)
        } else if err.is_connect() {
            Self::Unavailable(err.to_string())
        } else {
            Self::Vendor {
                status: err.status().map_or(0, |s| s.as_u16()),
                detail: err.to_string(),
            }
        }
    }
}
