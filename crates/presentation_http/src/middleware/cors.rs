//! Origin allow-list
//!
//! With an empty allow-list every origin is mirrored back; with a
//! non-empty list requests from unlisted origins are refused outright
//! instead of merely missing their CORS headers. Preflight requests are
//! answered here without reaching the router.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::{
        HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
        },
    },
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use crate::error::ApiError;

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
const ALLOWED_HEADERS: &str = "authorization, content-type";

/// Layer that enforces the origin allow-list
#[derive(Clone, Debug)]
pub struct OriginGuardLayer {
    allowed: Arc<Vec<String>>,
}

impl OriginGuardLayer {
    /// Create the layer; an empty list allows every origin
    #[must_use]
    pub fn new(allowed: Vec<String>) -> Self {
        Self {
            allowed: Arc::new(allowed),
        }
    }
}

impl<S> Layer<S> for OriginGuardLayer {
    type Service = OriginGuard<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OriginGuard {
            inner,
            allowed: Arc::clone(&self.allowed),
        }
    }
}

/// Middleware service enforcing the origin allow-list
#[derive(Clone, Debug)]
pub struct OriginGuard<S> {
    inner: S,
    allowed: Arc<Vec<String>>,
}

fn origin_allowed(allowed: &[String], origin: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|entry| entry == origin)
}

fn apply_cors_headers(response: &mut Response, origin: &HeaderValue) {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(VARY, HeaderValue::from_static("origin"));
}

fn preflight_response(origin: &HeaderValue) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(VARY, HeaderValue::from_static("origin"));
    response
}

impl<S> Service<Request> for OriginGuard<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let allowed = Arc::clone(&self.allowed);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(origin) = req.headers().get(ORIGIN).cloned() else {
                // Non-browser clients carry no Origin and bypass CORS
                return inner.call(req).await;
            };

            let Ok(origin_str) = origin.to_str() else {
                return Ok(
                    ApiError::OriginForbidden("unreadable origin".to_string()).into_response()
                );
            };

            if !origin_allowed(&allowed, origin_str) {
                return Ok(ApiError::OriginForbidden(origin_str.to_string()).into_response());
            }

            if req.method() == Method::OPTIONS {
                return Ok(preflight_response(&origin));
            }

            let mut response = inner.call(req).await?;
            apply_cors_headers(&mut response, &origin);
            Ok(response)
        })
    }
}
