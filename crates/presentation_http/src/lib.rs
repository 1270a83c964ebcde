//! HTTP surface for VoxBridge
//!
//! Routes, handlers, middleware and the error-to-status mapping. The
//! binary in `main.rs` wires this router to the configured adapters.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::{AppState, StatusInfo};
