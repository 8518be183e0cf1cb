//! Middleware stack.
//!
//! Layer order: Request → BodyLimit → CORS → Tracing → Handler

pub mod cors;
pub mod tracing;

pub use cors::create_cors_layer;
pub use tracing::TracingLayer;
