//! Route table and middleware assembly.

use crate::domain::config::ServiceConfig;
use crate::handlers::{account, client_state, export, health, inventory};
use crate::middleware::{create_cors_layer, TracingLayer};
use crate::state::AppState;
use crate::ws::ws_upgrade;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::services::ServeDir;

/// Build the full HTTP surface for `state`.
///
/// When a static directory is configured, paths no route claims are served
/// from it.
pub fn build_router(state: AppState, config: &ServiceConfig) -> Router {
    let routes = Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route(
            "/inventory",
            get(inventory::list_items).post(inventory::add_item),
        )
        .route(
            "/inventory/:id",
            put(inventory::update_item).delete(inventory::delete_item),
        )
        .route("/export", get(export::export_csv))
        .route(
            "/api/state",
            get(client_state::read_state).post(client_state::write_state),
        )
        .route("/ws", get(ws_upgrade))
        .route("/health", get(health::health_check));

    let routes = match &config.http.static_dir {
        Some(dir) => routes.fallback_service(ServeDir::new(dir)),
        None => routes,
    };

    routes
        .layer(TracingLayer::new())
        .layer(create_cors_layer(&config.cors))
        .layer(DefaultBodyLimit::max(config.limits.body_limit_bytes))
        .with_state(state)
}
