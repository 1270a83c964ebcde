//! Bearer token authentication
//!
//! One shared token gates the capability routes; `/status` stays open so
//! deployments can be probed. Token comparison is constant-time.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tower::{Layer, Service};

use crate::error::ApiError;

/// Layer that applies bearer token authentication
#[derive(Clone, Debug)]
pub struct BearerAuthLayer {
    token: Option<Arc<str>>,
    excluded_paths: Vec<String>,
}

impl BearerAuthLayer {
    /// Create the layer; a `None` token disables authentication
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(Arc::from),
            excluded_paths: vec!["/status".to_string()],
        }
    }

    /// Add paths that skip authentication
    #[must_use]
    pub fn exclude_paths(mut self, paths: Vec<String>) -> Self {
        self.excluded_paths.extend(paths);
        self
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuth {
            inner,
            token: self.token.clone(),
            excluded_paths: self.excluded_paths.clone(),
        }
    }
}

/// Middleware service for bearer token authentication
#[derive(Clone, Debug)]
pub struct BearerAuth<S> {
    inner: S,
    token: Option<Arc<str>>,
    excluded_paths: Vec<String>,
}

fn token_matches(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

impl<S> Service<Request> for BearerAuth<S>
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
        let token = self.token.clone();
        let excluded_paths = self.excluded_paths.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(expected) = token else {
                return inner.call(req).await;
            };

            let path = req.uri().path();
            if excluded_paths.iter().any(|p| path.starts_with(p)) {
                return inner.call(req).await;
            }

            let auth_header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok());

            match auth_header {
                Some(header) if header.starts_with("Bearer ") => {
                    let provided = &header[7..];
                    if token_matches(&expected, provided) {
                        inner.call(req).await
                    } else {
                        Ok(unauthorized("invalid token"))
                    }
                }
                Some(_) => Ok(unauthorized("expected a Bearer token")),
                None => Ok(unauthorized("missing Authorization header")),
            }
        })
    }
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use super::*;

    async fn test_handler() -> &'static str {
        "ok"
    }

    fn router_with_token(token: Option<&str>) -> Router {
        Router::new()
            .route("/llm", get(test_handler))
            .route("/status", get(test_handler))
            .layer(BearerAuthLayer::new(token.map(ToString::to_string)))
    }

    #[tokio::test]
    async fn no_token_configured_disables_auth() {
        let response = router_with_token(None)
            .oneshot(Request::builder().uri("/llm").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn correct_token_passes() {
        let response = router_with_token(Some("secret"))
            .oneshot(
                Request::builder()
                    .uri("/llm")
                    .header(AUTHORIZATION, "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_token_is_rejected() {
        let response = router_with_token(Some("secret"))
            .oneshot(
                Request::builder()
                    .uri("/llm")
                    .header(AUTHORIZATION, "Bearer wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let response = router_with_token(Some("secret"))
            .oneshot(Request::builder().uri("/llm").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let response = router_with_token(Some("secret"))
            .oneshot(
                Request::builder()
                    .uri("/llm")
                    .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn status_is_exempt() {
        let response = router_with_token(Some("secret"))
            .oneshot(
                Request::builder()
                    .uri("/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn comparison_handles_length_mismatch() {
        assert!(token_matches("secret", "secret"));
        assert!(!token_matches("secret", "secre"));
        assert!(!token_matches("secret", "secret2"));
    }
}
