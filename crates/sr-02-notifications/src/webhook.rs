//! Discord-style webhook adapter.

use crate::live_handle::LiveMessageHandle;
use crate::messages::render_live_summary;
use crate::sink::NotificationSink;
use crate::{NotificationError, NotifyResult};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use shared_types::InventoryItem;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Webhook endpoints and delivery settings.
#[derive(Debug, Clone)]
pub struct WebhookSinkConfig {
    /// Audit log channel. `None` disables log events.
    pub log_url: Option<String>,
    /// Live summary channel. `None` disables the summary.
    pub live_url: Option<String>,
    /// Where the current live message id is mirrored.
    pub live_handle_path: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct PostedMessage {
    id: String,
}

/// Delivers notifications to webhook URLs over HTTP.
pub struct WebhookSink {
    client: Client,
    log_url: Option<Url>,
    live_url: Option<Url>,
    /// Held across delete, post and persist so concurrent replacements
    /// cannot leave two summaries behind.
    live: Mutex<LiveMessageHandle>,
}

impl WebhookSink {
    pub fn new(config: WebhookSinkConfig) -> NotifyResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            log_url: config.log_url.as_deref().map(parse_url).transpose()?,
            live_url: config.live_url.as_deref().map(parse_url).transpose()?,
            live: Mutex::new(LiveMessageHandle::load(config.live_handle_path)),
        })
    }

    pub fn log_enabled(&self) -> bool {
        self.log_url.is_some()
    }

    pub fn live_enabled(&self) -> bool {
        self.live_url.is_some()
    }

    async fn delete_message(&self, base: &Url, id: &str) -> NotifyResult<()> {
        let url = message_url(base, id)?;
        self.client
            .delete(url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn post_log_event(&self, text: &str) -> NotifyResult<()> {
        let Some(url) = &self.log_url else {
            return Ok(());
        };

        self.client
            .post(url.clone())
            .json(&json!({ "content": text }))
            .send()
            .await?
            .error_for_status()?;

        debug!(text, "Log event delivered");
        Ok(())
    }

    async fn replace_live_summary(&self, items: &[InventoryItem]) -> NotifyResult<()> {
        let Some(base) = &self.live_url else {
            return Ok(());
        };

        let mut handle = self.live.lock().await;

        if let Some(previous) = handle.current() {
            if let Err(e) = self.delete_message(base, previous).await {
                warn!(message_id = previous, error = %e, "Previous live summary not deleted");
            }
        }

        let mut url = base.clone();
        url.query_pairs_mut().append_pair("wait", "true");

        let posted: PostedMessage = self
            .client
            .post(url)
            .json(&render_live_summary(items, Utc::now()))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| NotificationError::MalformedResponse(e.to_string()))?;

        handle.store(&posted.id)?;
        debug!(message_id = %posted.id, items = items.len(), "Live summary replaced");
        Ok(())
    }
}

fn parse_url(raw: &str) -> NotifyResult<Url> {
    Url::parse(raw).map_err(|e| NotificationError::InvalidUrl(format!("{raw}: {e}")))
}

/// `{base}/messages/{id}` with any query string dropped.
fn message_url(base: &Url, id: &str) -> NotifyResult<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| NotificationError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push("messages")
        .push(id);
    Ok(url)
}
