//! # Shared Bus - Realtime Change Broadcaster
//!
//! Pushes an "inventory changed" signal to every currently connected
//! observer (browser sockets, tests, future subsystems).
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────┐
//! │ Mutation Pipeline│    publish()       │  WebSocket   │
//! │                  │ ──────┐            │  connection  │
//! └──────────────────┘       │            └──────────────┘
//!                            ▼                    ↑
//!                      ┌──────────────┐          │
//!                      │  Event Bus   │ ─────────┘
//!                      └──────────────┘  subscribe()
//! ```
//!
//! ## Delivery
//!
//! - At most once per observer connected at publish time
//! - No replay for observers that connect later
//! - Events carry no payload; observers re-fetch the full inventory

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::InventoryEvent;
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it is marked lagged.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
