//! Infrastructure backends for VoxBridge
//!
//! Concrete implementations of the ports the application layer defines:
//! an in-process moka cache and environment-driven configuration.

pub mod cache;
pub mod config;

pub use cache::{MokaCache, MokaCacheConfig};
pub use config::{AppConfig, CacheSettings, ConfigError, ServerConfig};
