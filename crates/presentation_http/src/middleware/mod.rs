//! Tower middleware

pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::BearerAuthLayer;
pub use cors::OriginGuardLayer;
pub use rate_limit::{RateLimiterConfig, RateLimiterLayer};
