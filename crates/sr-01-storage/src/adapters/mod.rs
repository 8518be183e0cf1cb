//! # Storage Adapters
//!
//! - `sqlite.rs` - Production backend on a single SQLite file
//! - `memory.rs` - In-memory backend for unit tests

pub mod memory;
pub mod sqlite;
