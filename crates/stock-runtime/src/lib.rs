//! # Stock Runtime
//!
//! Entry point wiring for the inventory service.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment and validate it
//! 2. Open (or create) the SQLite database
//! 3. Pick the notification sink: webhooks when any URL is configured,
//!    otherwise a no-op sink
//! 4. Build the API gateway and serve until a shutdown signal arrives

pub mod shutdown;
pub mod telemetry;

use anyhow::{Context, Result};
use sr_01_storage::{Database, SqliteCredentialStore, SqliteInventoryStore, StateFile};
use sr_02_notifications::{NoopSink, NotificationSink, WebhookSink, WebhookSinkConfig};
use sr_03_api_gateway::{ApiGatewayService, Backends, ServiceConfig};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// The assembled service, ready to serve.
pub struct StockRuntime {
    service: ApiGatewayService,
}

impl StockRuntime {
    /// Open storage and wire every component for `config`.
    pub fn build(config: ServiceConfig) -> Result<Self> {
        let backends = build_backends(&config)?;
        let service = ApiGatewayService::new(config, backends)
            .context("failed to assemble API gateway")?;
        Ok(Self { service })
    }

    pub fn service(&self) -> &ApiGatewayService {
        &self.service
    }

    /// Serve on the configured address until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.service.run(shutdown).await.context("server failed")
    }
}

/// Storage and notification adapters for `config`.
pub fn build_backends(config: &ServiceConfig) -> Result<Backends> {
    let db_path = &config.storage.database_path;
    let db = Database::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    info!(path = %db_path.display(), "Database ready");

    Ok(Backends {
        inventory: Arc::new(SqliteInventoryStore::new(db.clone())),
        credentials: Arc::new(SqliteCredentialStore::new(db)),
        notifier: build_notifier(config)?,
        state_file: StateFile::new(&config.storage.state_file),
    })
}

fn build_notifier(config: &ServiceConfig) -> Result<Arc<dyn NotificationSink>> {
    let webhooks = &config.webhooks;
    if !webhooks.any_enabled() {
        info!("No webhooks configured; notifications disabled");
        return Ok(Arc::new(NoopSink));
    }

    let sink = WebhookSink::new(WebhookSinkConfig {
        log_url: webhooks.log_url.clone(),
        live_url: webhooks.live_url.clone(),
        live_handle_path: config.storage.live_message_file.clone(),
        timeout: webhooks.timeout(),
    })
    .context("invalid webhook configuration")?;

    info!(
        log = sink.log_enabled(),
        live = sink.live_enabled(),
        "Webhook notifications enabled"
    );
    Ok(Arc::new(sink))
}
