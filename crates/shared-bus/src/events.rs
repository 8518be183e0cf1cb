//! # Inventory Events
//!
//! Events that flow through the shared bus.

use serde::{Deserialize, Serialize};

/// Name of the push event browsers listen for.
pub const UPDATE_EVENT: &str = "update";

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    /// A mutation was persisted. Observers should re-fetch the inventory.
    Changed,
}

impl InventoryEvent {
    /// Wire name of the event as seen by clients.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            InventoryEvent::Changed => UPDATE_EVENT,
        }
    }

    /// JSON frame pushed to socket clients.
    #[must_use]
    pub fn to_frame(&self) -> String {
        serde_json::json!({ "event": self.name() }).to_string()
    }
}
