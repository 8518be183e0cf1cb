//! # Change Announcements
//!
//! The publishing half of the bus. A publish reaches whoever is connected at
//! that instant and nobody else.

use crate::events::InventoryEvent;
use crate::subscriber::{EventStream, Subscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Announces persisted inventory changes.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Announce `event`, returning how many observers were reached.
    async fn publish(&self, event: InventoryEvent) -> usize;

    /// Announcements made since startup, reached or not.
    fn events_published(&self) -> u64;
}

/// Single-process bus over a `tokio::sync::broadcast` channel.
pub struct InMemoryEventBus {
    tx: broadcast::Sender<InventoryEvent>,
    announced: AtomicU64,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// `capacity` bounds how far an observer may fall behind before its
    /// backlog is collapsed into one change.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            announced: AtomicU64::new(0),
        }
    }

    /// Observe changes announced from now on.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let rx = self.tx.subscribe();
        trace!(observers = self.tx.receiver_count(), "Observer attached");
        Subscription::new(rx)
    }

    /// Like [`InMemoryEventBus::subscribe`], as a `Stream` for socket loops.
    #[must_use]
    pub fn event_stream(&self) -> EventStream {
        EventStream::new(self.tx.subscribe())
    }

    /// Observers currently attached.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: InventoryEvent) -> usize {
        self.announced.fetch_add(1, Ordering::Relaxed);

        // `send` only errs when nobody is attached.
        let reached = self.tx.send(event).unwrap_or(0);
        debug!(event = event.name(), observers = reached, "Change announced");
        reached
    }

    fn events_published(&self) -> u64 {
        self.announced.load(Ordering::Relaxed)
    }
}
