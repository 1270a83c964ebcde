//! Rate limiting
//!
//! Fixed one-minute window per client IP. The window resets as a whole
//! rather than refilling continuously, which keeps the bookkeeping to a
//! counter and a timestamp per client.

use std::{
    collections::HashMap,
    future::Future,
    net::IpAddr,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::{Duration, Instant},
};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use tokio::sync::RwLock;
use tower::{Layer, Service};

use crate::error::ApiError;

const WINDOW: Duration = Duration::from_secs(60);

/// Rate limiter configuration
#[derive(Clone, Debug)]
pub struct RateLimiterConfig {
    /// Maximum requests per window
    pub requests_per_minute: u32,
    /// Enable rate limiting
    pub enabled: bool,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Shared rate limiter state
#[derive(Debug)]
pub struct RateLimiterState {
    windows: RwLock<HashMap<IpAddr, Window>>,
    limit: u32,
}

impl RateLimiterState {
    /// Create state for a per-minute limit
    #[must_use]
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            limit: requests_per_minute,
        }
    }

    /// Whether a request from the given IP fits in its current window
    #[allow(clippy::significant_drop_tightening)]
    pub async fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.write().await;
        let window = windows.entry(ip).or_insert(Window { started: now, count: 0 });

        if now.duration_since(window.started) >= WINDOW {
            window.started = now;
            window.count = 0;
        }

        if window.count < self.limit {
            window.count += 1;
            true
        } else {
            false
        }
    }

    /// Drop windows idle for longer than `older_than`
    pub async fn cleanup(&self, older_than: Duration) {
        let cutoff = Instant::now()
            .checked_sub(older_than)
            .unwrap_or_else(Instant::now);
        self.windows
            .write()
            .await
            .retain(|_, window| window.started > cutoff);
    }
}

/// Layer that applies rate limiting
#[derive(Clone, Debug)]
pub struct RateLimiterLayer {
    state: Arc<RateLimiterState>,
    enabled: bool,
    excluded_paths: Vec<String>,
}

impl RateLimiterLayer {
    /// Create a new rate limiter layer
    #[must_use]
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            state: Arc::new(RateLimiterState::new(config.requests_per_minute)),
            enabled: config.enabled,
            excluded_paths: vec!["/status".to_string()],
        }
    }

    /// Shared state handle, for periodic cleanup tasks
    #[must_use]
    pub fn state(&self) -> Arc<RateLimiterState> {
        Arc::clone(&self.state)
    }
}

impl<S> Layer<S> for RateLimiterLayer {
    type Service = RateLimiter<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimiter {
            inner,
            state: Arc::clone(&self.state),
            enabled: self.enabled,
            excluded_paths: self.excluded_paths.clone(),
        }
    }
}

/// Middleware service for rate limiting
#[derive(Clone, Debug)]
pub struct RateLimiter<S> {
    inner: S,
    state: Arc<RateLimiterState>,
    enabled: bool,
    excluded_paths: Vec<String>,
}

impl<S> Service<Request> for RateLimiter<S>
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
        let enabled = self.enabled;
        let state = Arc::clone(&self.state);
        let excluded_paths = self.excluded_paths.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !enabled {
                return inner.call(req).await;
            }

            let path = req.uri().path();
            if excluded_paths.iter().any(|p| path.starts_with(p)) {
                return inner.call(req).await;
            }

            let client_ip = extract_client_ip(&req);
            if state.check(client_ip).await {
                inner.call(req).await
            } else {
                Ok(ApiError::RateLimited.into_response())
            }
        })
    }
}

fn extract_client_ip(req: &Request) -> IpAddr {
    // Behind a reverse proxy the first X-Forwarded-For entry is the client
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        && let Some(ip_str) = forwarded.split(',').next()
        && let Ok(ip) = ip_str.trim().parse::<IpAddr>()
    {
        return ip;
    }

    req.extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map_or(IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), |info| {
            info.0.ip()
        })
}
