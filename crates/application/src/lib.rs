//! Use-case orchestration for VoxBridge
//!
//! The gateway sits between the HTTP surface and the vendor adapters:
//! it validates requests, consults the cache, calls the selected adapter
//! and caches successful results. Vendor selection itself is a pure
//! function over the configuration.

pub mod cache_key;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod selector;

pub use error::GatewayError;
pub use gateway::{Cached, Gateway};
pub use ports::{CachePort, CachePortExt, CacheStats};
pub use selector::{llm_available, select_llm, select_tts, tts_available};
