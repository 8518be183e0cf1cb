//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (storage capabilities the gateway requires)

pub mod outbound;
