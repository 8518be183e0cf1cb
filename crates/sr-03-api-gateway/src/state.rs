//! Process-wide handler state, built once at startup.

use crate::auth::{PasswordHashing, TokenAuthority};
use crate::pipeline::MutationPipeline;
use axum::extract::FromRef;
use shared_bus::InMemoryEventBus;
use sr_01_storage::{CredentialStore, InventoryStore, StateFile};
use sr_02_notifications::NotificationSink;
use std::sync::Arc;

/// Storage and notification adapters the service runs on.
pub struct Backends {
    pub inventory: Arc<dyn InventoryStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub notifier: Arc<dyn NotificationSink>,
    pub state_file: StateFile,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<MutationPipeline>,
    pub inventory: Arc<dyn InventoryStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub tokens: Arc<TokenAuthority>,
    pub passwords: Arc<PasswordHashing>,
    pub state_file: Arc<StateFile>,
    pub bus: Arc<InMemoryEventBus>,
}

impl AppState {
    pub fn new(backends: Backends, tokens: TokenAuthority, passwords: PasswordHashing) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let pipeline = MutationPipeline::new(
            Arc::clone(&backends.inventory),
            backends.notifier,
            bus.clone(),
        );

        Self {
            pipeline: Arc::new(pipeline),
            inventory: backends.inventory,
            credentials: backends.credentials,
            tokens: Arc::new(tokens),
            passwords: Arc::new(passwords),
            state_file: Arc::new(backends.state_file),
            bus,
        }
    }
}

impl FromRef<AppState> for Arc<TokenAuthority> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.tokens)
    }
}
