//! VoxBridge server binary
//!
//! Wires configuration, vendor adapters, the cache and the middleware
//! stack together and serves until interrupted.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::{Gateway, select_llm, select_tts};
use infrastructure::{AppConfig, MokaCache, MokaCacheConfig};
use presentation_http::middleware::{BearerAuthLayer, OriginGuardLayer, RateLimiterConfig, RateLimiterLayer};
use presentation_http::{AppState, StatusInfo, build_router};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let llm_vendor = select_llm(config.llm_provider, &config.llm);
    let tts_vendor = select_tts(config.tts_provider, &config.tts);
    info!(llm = %llm_vendor, tts = %tts_vendor, "vendors selected");

    let llm = ai_text::build_generator(llm_vendor, config.llm.clone())
        .context("failed to build text generator")?;
    let tts = ai_speech::build_synthesizer(tts_vendor, config.tts.clone())
        .context("failed to build speech synthesizer")?;

    let cache = Arc::new(MokaCache::with_config(MokaCacheConfig {
        max_capacity_mb: config.cache.max_mb,
        ttl: Duration::from_secs(config.cache.ttl_secs),
    }));

    let gateway = Arc::new(Gateway::new(
        llm,
        tts,
        cache,
        Duration::from_secs(config.cache.ttl_secs),
    ));
    let status = StatusInfo::describe(&config, &gateway);
    let state = AppState::new(gateway, status);

    let rate_limiter = RateLimiterLayer::new(&RateLimiterConfig {
        requests_per_minute: config.server.rate_limit_rpm.unwrap_or(60),
        enabled: config.server.rate_limit_rpm.is_some(),
    });

    let app = build_router(state)
        .layer(rate_limiter)
        .layer(BearerAuthLayer::new(config.server.auth_token.clone()))
        .layer(OriginGuardLayer::new(config.server.allowed_origins.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "voxbridge listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("voxbridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install sigterm handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received ctrl-c"),
        () = terminate => info!("received sigterm"),
    }
}
