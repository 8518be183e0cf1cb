//! # Storage (sr-01)
//!
//! The persistence layer for accounts, the shared inventory table and the
//! free-form client state blob.
//!
//! ## Invariants
//!
//! | Invariant | Description |
//! |-----------|-------------|
//! | Durable before visible | A mutating call returns only after the row change is committed |
//! | Single-row atomicity | Each add/update/delete touches exactly one row in one statement |
//! | Stable snapshots | `list()` is ordered by id ascending |
//! | Monotonic ids | Deleted ids are never reused |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `ports/` - Driven port traits the gateway depends on
//! - `adapters/` - SQLite (production) and in-memory (tests) implementations
//! - `state_file.rs` - Whole-document JSON store for client state
//!
//! ## Usage
//!
//! ```ignore
//! use sr_01_storage::{Database, SqliteInventoryStore, InventoryStore};
//!
//! let db = Database::open("./database.db")?;
//! let store = SqliteInventoryStore::new(db.clone());
//! let item = store.add(1, &ItemDraft::new("Widget", 3))?;
//! ```

pub mod adapters;
pub mod ports;
pub mod state_file;

pub use adapters::memory::{InMemoryCredentialStore, InMemoryInventoryStore};
pub use adapters::sqlite::{Database, SqliteCredentialStore, SqliteInventoryStore};
pub use ports::outbound::{CredentialStore, InventoryStore};
pub use shared_types::StoreError;
pub use state_file::StateFile;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
