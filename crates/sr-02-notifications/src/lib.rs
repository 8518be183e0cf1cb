//! # Notifications (sr-02)
//!
//! Outbound, best-effort side effects of inventory mutations.
//!
//! ## Channels
//!
//! - **Log**: one discrete message per state-changing action (append-only)
//! - **Live**: a single message rendering the whole inventory, deleted and
//!   re-posted on every change so exactly one current summary exists
//!
//! Failures are reported to the caller as [`NotificationError`] so they can be
//! logged; they are never allowed to change the outcome of a mutation.

pub mod error;
pub mod live_handle;
pub mod messages;
pub mod sink;
pub mod webhook;

pub use error::NotificationError;
pub use live_handle::LiveMessageHandle;
pub use messages::{render_live_summary, LogEvent, MAX_EMBED_FIELDS};
pub use sink::{NoopSink, NotificationSink, RecordingSink};
pub use webhook::{WebhookSink, WebhookSinkConfig};

/// Result type for notification operations.
pub type NotifyResult<T> = Result<T, NotificationError>;
