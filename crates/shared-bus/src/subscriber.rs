//! # Event Subscriber
//!
//! Defines the subscription side of the event bus.

use crate::events::InventoryEvent;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// A subscription handle for receiving events.
///
/// Dropping the handle unsubscribes.
pub struct Subscription {
    receiver: broadcast::Receiver<InventoryEvent>,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<InventoryEvent>) -> Self {
        Self { receiver }
    }

    /// Receive the next event.
    ///
    /// A lagged subscriber gets a single `Changed` in place of everything it
    /// missed; change signals carry no payload so collapsing them is lossless.
    ///
    /// # Returns
    ///
    /// - `Some(event)` - The next event
    /// - `None` - The channel was closed (bus dropped)
    pub async fn recv(&mut self) -> Option<InventoryEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Closed) => None,
            Err(broadcast::error::RecvError::Lagged(count)) => {
                debug!(lagged = count, "Subscriber lagged, collapsing missed events");
                Some(InventoryEvent::Changed)
            }
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(event))` - An event was available
    /// - `Ok(None)` - No event available (would block)
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<InventoryEvent>, SubscriptionError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Closed) => Err(SubscriptionError::Closed),
            Err(broadcast::error::TryRecvError::Lagged(_)) => Ok(Some(InventoryEvent::Changed)),
        }
    }
}

/// A stream wrapper for subscriptions.
///
/// Implements `tokio_stream::Stream` for use with `select!` loops and
/// stream combinators.
pub struct EventStream {
    inner: BroadcastStream<InventoryEvent>,
}

impl EventStream {
    pub(crate) fn new(receiver: broadcast::Receiver<InventoryEvent>) -> Self {
        Self {
            inner: BroadcastStream::new(receiver),
        }
    }
}

impl Stream for EventStream {
    type Item = InventoryEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(event))) => Poll::Ready(Some(event)),
            Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(count)))) => {
                debug!(lagged = count, "Stream lagged, collapsing missed events");
                Poll::Ready(Some(InventoryEvent::Changed))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
