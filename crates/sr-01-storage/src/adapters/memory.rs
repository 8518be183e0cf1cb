//! # In-Memory Storage Adapter
//!
//! Map-backed implementations of the storage ports for unit tests.
//! Semantics match the SQLite adapter: ids start at 1 and are never reused.

use crate::ports::outbound::{CredentialStore, InventoryStore};
use crate::StoreResult;
use parking_lot::Mutex;
use shared_types::{InventoryItem, ItemDraft, ItemId, Role, StoreError, User, UserId};
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
struct InventoryTable {
    last_id: ItemId,
    rows: BTreeMap<ItemId, InventoryItem>,
}

/// In-memory [`InventoryStore`].
#[derive(Default)]
pub struct InMemoryInventoryStore {
    table: Mutex<InventoryTable>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn add(&self, owner: UserId, draft: &ItemDraft) -> StoreResult<InventoryItem> {
        let mut table = self.table.lock();
        table.last_id += 1;
        let item = InventoryItem {
            id: table.last_id,
            user_id: owner,
            name: draft.name.clone(),
            quantity: draft.quantity,
        };
        table.rows.insert(item.id, item.clone());
        Ok(item)
    }

    fn update(&self, id: ItemId, draft: &ItemDraft) -> StoreResult<InventoryItem> {
        let mut table = self.table.lock();
        let row = table.rows.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        row.name = draft.name.clone();
        row.quantity = draft.quantity;
        Ok(row.clone())
    }

    fn get(&self, id: ItemId) -> StoreResult<Option<InventoryItem>> {
        Ok(self.table.lock().rows.get(&id).cloned())
    }

    fn delete(&self, id: ItemId) -> StoreResult<InventoryItem> {
        self.table
            .lock()
            .rows
            .remove(&id)
            .ok_or(StoreError::NotFound { id })
    }

    fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self.table.lock().rows.values().cloned().collect())
    }
}

#[derive(Default)]
struct UserTable {
    last_id: UserId,
    by_name: HashMap<String, User>,
}

/// In-memory [`CredentialStore`].
#[derive(Default)]
pub struct InMemoryCredentialStore {
    table: Mutex<UserTable>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn create_user(&self, username: &str, password_hash: &str, role: &Role) -> StoreResult<User> {
        let mut table = self.table.lock();
        if table.by_name.contains_key(username) {
            return Err(StoreError::DuplicateUsername {
                username: username.to_string(),
            });
        }
        table.last_id += 1;
        let user = User {
            id: table.last_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role: role.clone(),
        };
        table.by_name.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.table.lock().by_name.get(username).cloned())
    }
}
