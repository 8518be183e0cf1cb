//! # Shared Types Crate
//!
//! This crate contains the domain entities and error types shared by the
//! storage, notification and gateway subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Stable Wire Format**: Inventory rows serialize with the column names
//!   browser clients already consume (`product_name`, `user_id`).
//! - **Identity from the token only**: Handlers never trust an owner id sent
//!   in a request body; the authenticated [`Identity`] is authoritative.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
