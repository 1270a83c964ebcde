//! Tone level value object
//!
//! Narrative intensity on a 1–5 scale. Out-of-range values are clamped
//! rather than rejected so that sloppy clients still get a sensible story.

use serde::{Deserialize, Serialize};

/// Narrative tone level, 1 (mildest) to 5 (most intense)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct ToneLevel(u8);

impl ToneLevel {
    /// Minimum tone level
    pub const MIN: Self = Self(1);
    /// Maximum tone level
    pub const MAX: Self = Self(5);

    /// Create a tone level, clamping into the 1–5 range
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(1, 5))
    }

    /// The numeric level
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for ToneLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl From<u8> for ToneLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<ToneLevel> for u8 {
    fn from(level: ToneLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for ToneLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
