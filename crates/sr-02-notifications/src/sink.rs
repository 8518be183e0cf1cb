//! The notification port and its non-network adapters.

use crate::{NotificationError, NotifyResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::InventoryItem;
use std::sync::atomic::{AtomicBool, Ordering};

/// Outbound port for mutation side effects.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Append one line to the audit log channel.
    async fn post_log_event(&self, text: &str) -> NotifyResult<()>;

    /// Replace the live summary with a rendering of `items`.
    async fn replace_live_summary(&self, items: &[InventoryItem]) -> NotifyResult<()>;
}

/// Sink used when no webhook is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl NotificationSink for NoopSink {
    async fn post_log_event(&self, _text: &str) -> NotifyResult<()> {
        Ok(())
    }

    async fn replace_live_summary(&self, _items: &[InventoryItem]) -> NotifyResult<()> {
        Ok(())
    }
}

/// In-memory sink that records every delivery, for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    logs: Mutex<Vec<String>>,
    summaries: Mutex<Vec<Vec<InventoryItem>>>,
    failing: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that records nothing and fails every call.
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.lock().clone()
    }

    pub fn summaries(&self) -> Vec<Vec<InventoryItem>> {
        self.summaries.lock().clone()
    }

    pub fn clear(&self) {
        self.logs.lock().clear();
        self.summaries.lock().clear();
    }

    fn check(&self) -> NotifyResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(NotificationError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn post_log_event(&self, text: &str) -> NotifyResult<()> {
        self.check()?;
        self.logs.lock().push(text.to_string());
        Ok(())
    }

    async fn replace_live_summary(&self, items: &[InventoryItem]) -> NotifyResult<()> {
        self.check()?;
        self.summaries.lock().push(items.to_vec());
        Ok(())
    }
}
