//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the mutation pipeline and the auth routes.
//!
//! Production: `SqliteInventoryStore` / `SqliteCredentialStore`
//! Testing: `InMemoryInventoryStore` / `InMemoryCredentialStore`

use crate::StoreResult;
use shared_types::{InventoryItem, ItemDraft, ItemId, Role, User, UserId};

/// Abstract interface over the shared inventory table.
///
/// Calls are short and synchronous; implementations serialize access
/// internally and hold no lock across calls.
pub trait InventoryStore: Send + Sync {
    /// Insert a new row owned by `owner`. Quantity is not range-checked.
    fn add(&self, owner: UserId, draft: &ItemDraft) -> StoreResult<InventoryItem>;

    /// Replace name and quantity of an existing row.
    ///
    /// Fails with `StoreError::NotFound` when `id` does not exist.
    fn update(&self, id: ItemId, draft: &ItemDraft) -> StoreResult<InventoryItem>;

    /// Fetch a single row.
    fn get(&self, id: ItemId) -> StoreResult<Option<InventoryItem>>;

    /// Remove a row and return what was removed.
    ///
    /// Fails with `StoreError::NotFound` when `id` does not exist.
    fn delete(&self, id: ItemId) -> StoreResult<InventoryItem>;

    /// Full snapshot ordered by id ascending.
    fn list(&self) -> StoreResult<Vec<InventoryItem>>;
}

/// Abstract interface over registered accounts.
pub trait CredentialStore: Send + Sync {
    /// Persist a new account.
    ///
    /// Fails with `StoreError::DuplicateUsername` if the name is taken.
    fn create_user(&self, username: &str, password_hash: &str, role: &Role) -> StoreResult<User>;

    /// Look up an account by its exact username.
    fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;
}
