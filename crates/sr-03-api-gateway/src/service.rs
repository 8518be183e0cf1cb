//! API Gateway service - assembles state and runs the HTTP server.

use crate::auth::{PasswordHashing, TokenAuthority};
use crate::domain::config::ServiceConfig;
use crate::domain::error::GatewayError;
use crate::router::build_router;
use crate::state::{AppState, Backends};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// API Gateway service state
pub struct ApiGatewayService {
    config: ServiceConfig,
    state: AppState,
}

impl ApiGatewayService {
    /// Create the service from validated configuration and its backends.
    pub fn new(config: ServiceConfig, backends: Backends) -> Result<Self, GatewayError> {
        let passwords =
            PasswordHashing::new().map_err(|e| GatewayError::Credentials(e.to_string()))?;
        Self::with_password_hashing(config, backends, passwords)
    }

    /// Like [`ApiGatewayService::new`] with explicit hashing parameters.
    pub fn with_password_hashing(
        config: ServiceConfig,
        backends: Backends,
        passwords: PasswordHashing,
    ) -> Result<Self, GatewayError> {
        config.validate()?;

        let tokens = TokenAuthority::from_config(&config.auth);
        let state = AppState::new(backends, tokens, passwords);

        Ok(Self { config, state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local: Option<SocketAddr> = listener.local_addr().ok();
        info!(addr = ?local, "Serving HTTP and WebSocket");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}
