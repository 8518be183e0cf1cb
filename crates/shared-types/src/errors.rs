//! # Error Types
//!
//! Defines error types used across subsystems.

use crate::entities::ItemId;
use thiserror::Error;

/// Errors that can occur in the storage subsystem.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Inventory row not found.
    #[error("Item not found: {id}")]
    NotFound { id: ItemId },

    /// Registration attempted with a username that is already taken.
    #[error("Username already exists: {username}")]
    DuplicateUsername { username: String },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// True for failures of the storage medium itself, as opposed to
    /// lookups that legitimately found nothing.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Database(_) | StoreError::Io(_) | StoreError::Serialization(_)
        )
    }
}
