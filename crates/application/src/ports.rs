//! Cache port
//!
//! The gateway caches serialized results as bytes; the typed extension
//! trait layers JSON on top so call sites stay readable. The concrete
//! store lives in the infrastructure crate.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;

/// Hit/miss counters for the `/status` endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries currently resident
    pub entries: u64,
}

/// A byte-oriented cache with per-entry TTL
#[async_trait]
pub trait CachePort: Send + Sync {
    /// Fetch a value if present and not expired
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, GatewayError>;

    /// Store a value for at most `ttl`
    async fn set_bytes(&self, key: &str, value: Vec<u8>, ttl: Duration)
    -> Result<(), GatewayError>;

    /// Current counters
    async fn stats(&self) -> CacheStats;
}

/// Typed JSON convenience over [`CachePort`]
#[async_trait]
pub trait CachePortExt: CachePort {
    /// Fetch and deserialize a value
    async fn get<T>(&self, key: &str) -> Result<Option<T>, GatewayError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value
    async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), GatewayError>
    where
        T: Serialize + Send + Sync,
    {
        let bytes = serde_json::to_vec(value)?;
        self.set_bytes(key, bytes, ttl).await
    }
}

impl<C: CachePort + ?Sized> CachePortExt for C {}
