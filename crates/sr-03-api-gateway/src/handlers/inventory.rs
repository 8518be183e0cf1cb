//! Inventory routes. All of them require a valid token.

use crate::auth::AuthenticatedUser;
use crate::blocking::run_blocking;
use crate::domain::{ApiError, ApiJson, ApiResult, ItemRequest};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use shared_types::{InventoryItem, ItemId};
use std::sync::Arc;

/// `GET /inventory`
pub async fn list_items(
    AuthenticatedUser(_): AuthenticatedUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<InventoryItem>>> {
    let store = Arc::clone(&state.inventory);
    Ok(Json(run_blocking(move || store.list()).await?))
}

/// `POST /inventory`
pub async fn add_item(
    AuthenticatedUser(actor): AuthenticatedUser,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ItemRequest>,
) -> ApiResult<Json<InventoryItem>> {
    let draft = req.into_draft()?;
    Ok(Json(state.pipeline.add(&actor, draft).await?))
}

/// `PUT /inventory/:id`
pub async fn update_item(
    AuthenticatedUser(actor): AuthenticatedUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(req): ApiJson<ItemRequest>,
) -> ApiResult<Json<InventoryItem>> {
    let id = parse_id(&raw_id)?;
    let draft = req.into_draft()?;
    Ok(Json(state.pipeline.update(&actor, id, draft).await?))
}

/// `DELETE /inventory/:id`
pub async fn delete_item(
    AuthenticatedUser(actor): AuthenticatedUser,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<InventoryItem>> {
    let id = parse_id(&raw_id)?;
    Ok(Json(state.pipeline.delete(&actor, id).await?))
}

/// A path segment that is not an integer names no row.
fn parse_id(raw: &str) -> ApiResult<ItemId> {
    raw.parse()
        .map_err(|_| ApiError::not_found(format!("item {raw} not found")))
}
