//! Moka in-memory cache
//!
//! Thread-safe in-process cache with TTL-based eviction, weighed by entry
//! size so the audio payloads are what the capacity bound actually limits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use application::{CachePort, CacheStats, GatewayError};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, instrument};

/// Configuration for the moka cache
#[derive(Debug, Clone, Copy)]
pub struct MokaCacheConfig {
    /// Maximum capacity in megabytes
    pub max_capacity_mb: u64,
    /// TTL applied to every entry
    pub ttl: Duration,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity_mb: 64,
            ttl: Duration::from_secs(3600),
        }
    }
}

/// Moka-backed implementation of [`CachePort`]
///
/// Moka 0.12 applies TTL at the cache level, so the per-entry `ttl`
/// argument is ignored; the gateway passes the same TTL for every entry
/// anyway.
pub struct MokaCache {
    cache: Cache<String, Vec<u8>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaCache {
    /// Create a cache with default capacity and TTL
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MokaCacheConfig::default())
    }

    /// Create a cache with explicit capacity and TTL
    #[must_use]
    pub fn with_config(config: MokaCacheConfig) -> Self {
        let max_capacity_bytes = config.max_capacity_mb * 1024 * 1024;
        let cache = Cache::builder()
            .max_capacity(max_capacity_bytes)
            .time_to_live(config.ttl)
            .weigher(|_key: &String, value: &Vec<u8>| -> u32 {
                value.len().try_into().unwrap_or(u32::MAX)
            })
            .build();
        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CachePort for MokaCache {
    #[instrument(skip(self), level = "debug")]
    #[allow(clippy::option_if_let_else)]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, GatewayError> {
        if let Some(bytes) = self.cache.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "cache hit");
            Ok(Some(bytes))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "cache miss");
            Ok(None)
        }
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        _ttl: Duration,
    ) -> Result<(), GatewayError> {
        self.cache.insert(key.to_string(), value).await;
        debug!(key = %key, "cache set");
        Ok(())
    }

    async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}
