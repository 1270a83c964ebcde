//! Value objects

mod tone_level;
mod vendor;

pub use tone_level::ToneLevel;
pub use vendor::{Capability, LlmVendor, TtsVendor};
