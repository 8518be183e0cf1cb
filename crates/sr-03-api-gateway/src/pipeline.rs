//! # Mutation Pipeline
//!
//! Every inventory change runs the same sequence inside the request task:
//!
//! ```text
//! validate ─► persist ─► snapshot ─► notify ─► broadcast ─► respond
//!    │           │           │          │
//!    └─ 400/404  └─ 500      └─ logged  └─ logged, never fails the request
//! ```
//!
//! Nothing after `persist` can turn a committed change into an error
//! response, and nothing after a failed step before it is executed.

use crate::blocking::run_blocking;
use crate::domain::error::{ApiError, ApiResult};
use shared_bus::{EventPublisher, InventoryEvent};
use shared_types::{Identity, InventoryItem, ItemDraft, ItemId};
use sr_01_storage::InventoryStore;
use sr_02_notifications::{LogEvent, NotificationSink};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs inventory mutations and their side effects.
pub struct MutationPipeline {
    store: Arc<dyn InventoryStore>,
    notifier: Arc<dyn NotificationSink>,
    bus: Arc<dyn EventPublisher>,
}

impl MutationPipeline {
    pub fn new(
        store: Arc<dyn InventoryStore>,
        notifier: Arc<dyn NotificationSink>,
        bus: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            notifier,
            bus,
        }
    }

    /// Create an item owned by `actor`.
    pub async fn add(&self, actor: &Identity, draft: ItemDraft) -> ApiResult<InventoryItem> {
        let store = Arc::clone(&self.store);
        let owner = actor.user_id;
        let item = run_blocking(move || store.add(owner, &draft)).await?;
        info!(user = %actor.username, item_id = item.id, quantity = item.quantity, "Item added");

        let mut events = vec![LogEvent::added(&actor.username, &item)];
        if item.is_low_stock() {
            events.push(LogEvent::low_stock(&item));
        }
        self.after_commit(events).await;
        Ok(item)
    }

    /// Replace name and quantity of an existing item. The owner is kept.
    pub async fn update(
        &self,
        actor: &Identity,
        id: ItemId,
        draft: ItemDraft,
    ) -> ApiResult<InventoryItem> {
        self.require_existing(id).await?;

        let store = Arc::clone(&self.store);
        let item = run_blocking(move || store.update(id, &draft)).await?;
        info!(user = %actor.username, item_id = id, quantity = item.quantity, "Item updated");

        let mut events = vec![LogEvent::updated(&actor.username, &item)];
        if item.is_low_stock() {
            events.push(LogEvent::low_stock(&item));
        }
        self.after_commit(events).await;
        Ok(item)
    }

    /// Remove an item and return it.
    pub async fn delete(&self, actor: &Identity, id: ItemId) -> ApiResult<InventoryItem> {
        self.require_existing(id).await?;

        let store = Arc::clone(&self.store);
        let item = run_blocking(move || store.delete(id)).await?;
        info!(user = %actor.username, item_id = id, "Item deleted");

        self.after_commit(vec![LogEvent::deleted(&actor.username, &item)])
            .await;
        Ok(item)
    }

    async fn require_existing(&self, id: ItemId) -> ApiResult<InventoryItem> {
        let store = Arc::clone(&self.store);
        run_blocking(move || store.get(id))
            .await?
            .ok_or_else(|| ApiError::not_found(format!("item {id} not found")))
    }

    /// Snapshot, notify and broadcast. Only called once the row change is
    /// durable; never fails.
    async fn after_commit(&self, events: Vec<LogEvent>) {
        let store = Arc::clone(&self.store);
        let snapshot = match tokio::task::spawn_blocking(move || store.list()).await {
            Ok(Ok(items)) => Some(items),
            Ok(Err(e)) => {
                error!(error = %e, "Inventory snapshot failed; live summary skipped");
                None
            }
            Err(e) => {
                error!(error = %e, "Inventory snapshot task failed; live summary skipped");
                None
            }
        };

        for event in &events {
            if let Err(e) = self.notifier.post_log_event(&event.to_string()).await {
                warn!(error = %e, "Log notification failed");
            }
        }

        if let Some(items) = snapshot {
            if let Err(e) = self.notifier.replace_live_summary(&items).await {
                warn!(error = %e, "Live summary update failed");
            }
        }

        self.bus.publish(InventoryEvent::Changed).await;
    }
}
