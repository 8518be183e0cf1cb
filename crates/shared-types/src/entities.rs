//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Accounts**: `User`, `Role`, `Identity`
//! - **Inventory**: `InventoryItem`, `ItemDraft`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantity below which a change emits a low-stock warning.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Database identifier of a registered user.
pub type UserId = i64;

/// Database identifier of an inventory row.
pub type ItemId = i64;

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// Free-form role label carried in tokens.
///
/// Registration accepts any label; nothing in this service branches on it
/// beyond echoing it back in the authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Role assigned when registration omits one.
    pub const DEFAULT: &'static str = "user";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered account.
///
/// Created at registration and never modified or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// PHC-formatted password hash. Never serialized to clients.
    pub password_hash: String,
    pub role: Role,
}

impl User {
    /// The identity a token issued for this user will carry.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id,
            username: self.username.clone(),
            role: self.role.clone(),
        }
    }
}

/// The verified caller of a request, as recovered from its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

// =============================================================================
// CLUSTER B: INVENTORY
// =============================================================================

/// One row of the shared inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    /// Owner reference. Not enforced as a foreign key.
    pub user_id: UserId,
    #[serde(rename = "product_name", alias = "name")]
    pub name: String,
    pub quantity: i64,
}

impl InventoryItem {
    /// Whether this row sits below [`LOW_STOCK_THRESHOLD`].
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }
}

/// Validated name/quantity pair for an add or edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub quantity: i64,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}
