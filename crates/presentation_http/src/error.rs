//! API error type and HTTP mapping
//!
//! Every failure leaves the bridge as `{"ok": false, "error": <code>,
//! "detail": <text>}`. Vendor-side failures map to 502 so callers can
//! tell them apart from problems inside the bridge itself.

use ai_speech::SynthesisError;
use ai_text::GenerationError;
use application::GatewayError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors the HTTP layer can return
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body or parameters are unusable
    #[error("{0}")]
    InvalidRequest(String),

    /// Bearer token missing or wrong
    #[error("{0}")]
    Unauthorized(String),

    /// Origin not on the CORS allow-list
    #[error("origin not allowed: {0}")]
    OriginForbidden(String),

    /// No such route
    #[error("no such endpoint")]
    NotFound,

    /// Client exceeded the request budget
    #[error("rate limit exceeded")]
    RateLimited,

    /// The selected vendor has no credential configured
    #[error("missing credential for vendor {0}")]
    MissingCredential(String),

    /// The vendor cannot produce what was asked for
    #[error("{0}")]
    UnsupportedFormat(String),

    /// The vendor could not be reached
    #[error("{0}")]
    VendorUnavailable(String),

    /// The vendor rejected the forwarded request
    #[error("{0}")]
    VendorRejected(String),

    /// The vendor failed or timed out
    #[error("{0}")]
    VendorError(String),

    /// The vendor replied with something the bridge cannot read
    #[error("{0}")]
    MalformedResponse(String),

    /// Something inside the bridge went wrong
    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    ok: bool,
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ApiError {
    const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::OriginForbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::MissingCredential(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::VendorUnavailable(_)
            | Self::VendorRejected(_)
            | Self::VendorError(_)
            | Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Unauthorized(_) => "unauthorized",
            Self::OriginForbidden(_) => "origin_forbidden",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::MissingCredential(_) => "missing_credential",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::VendorUnavailable(_) => "vendor_unavailable",
            Self::VendorRejected(_) => "vendor_rejected",
            Self::VendorError(_) => "vendor_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, status = %status, "request failed");
        } else {
            warn!(error = %self, status = %status, "request refused");
        }
        let body = ErrorBody {
            ok: false,
            error: self.error_code(),
            detail: Some(self.to_string()).filter(|detail| !detail.is_empty()),
        };
        (status, Json(body)).into_response()
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::MissingCredential(vendor) => Self::MissingCredential(vendor),
            GenerationError::Unavailable(detail) => Self::VendorUnavailable(detail),
            GenerationError::Rejected { .. } => Self::VendorRejected(err.to_string()),
            GenerationError::Vendor { .. } | GenerationError::Timeout(_) => {
                Self::VendorError(err.to_string())
            }
            GenerationError::MalformedResponse(detail) => Self::MalformedResponse(detail),
        }
    }
}

impl From<SynthesisError> for ApiError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::MissingCredential(vendor) => Self::MissingCredential(vendor),
            SynthesisError::UnsupportedFormat { .. } => Self::UnsupportedFormat(err.to_string()),
            SynthesisError::Unavailable(detail) => Self::VendorUnavailable(detail),
            SynthesisError::Rejected { .. } => Self::VendorRejected(err.to_string()),
            SynthesisError::Vendor { .. } | SynthesisError::Timeout(_) => {
                Self::VendorError(err.to_string())
            }
            SynthesisError::MalformedResponse(detail) => Self::MalformedResponse(detail),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidRequest(detail) => Self::InvalidRequest(detail),
            GatewayError::Generation(inner) => inner.into(),
            GatewayError::Synthesis(inner) => inner.into(),
            GatewayError::Internal(detail) => Self::Internal(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn invalid_request_is_400() {
        assert_eq!(
            status_of(ApiError::InvalidRequest("prompt is required".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn unsupported_format_is_400() {
        assert_eq!(
            status_of(ApiError::UnsupportedFormat("no ogg".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_credential_is_500() {
        assert_eq!(
            status_of(ApiError::MissingCredential("openai".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn vendor_failures_are_502() {
        assert_eq!(
            status_of(ApiError::VendorRejected("status 401".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ApiError::VendorError("status 503".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(ApiError::MalformedResponse("no content".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn rate_limited_is_429() {
        assert_eq!(status_of(ApiError::RateLimited), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn gateway_errors_map_through() {
        let err: ApiError = GatewayError::Generation(GenerationError::Rejected {
            status: 401,
            detail: "bad key".to_string(),
        })
        .into();
        assert!(matches!(err, ApiError::VendorRejected(_)));

        let err: ApiError = GatewayError::Synthesis(SynthesisError::MissingCredential(
            "coqui".to_string(),
        ))
        .into();
        assert!(matches!(err, ApiError::MissingCredential(_)));
    }

    #[test]
    fn timeouts_map_to_vendor_error() {
        let err: ApiError = GenerationError::Timeout(120_000).into();
        assert!(matches!(err, ApiError::VendorError(_)));
    }
}
