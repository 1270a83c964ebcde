//! Domain layer for VoxBridge
//!
//! Shared value objects used across the capability crates: tone levels,
//! vendor identifiers, and domain-level errors. No I/O, no framework code.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{Capability, LlmVendor, ToneLevel, TtsVendor};
