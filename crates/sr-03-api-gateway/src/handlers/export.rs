//! `GET /export`: the inventory as a CSV attachment.

use crate::auth::AuthenticatedUser;
use crate::blocking::run_blocking;
use crate::domain::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use shared_types::InventoryItem;
use std::sync::Arc;
use tracing::info;

/// Column order of the export.
pub const CSV_HEADER: [&str; 4] = ["id", "user_id", "product_name", "quantity"];

pub async fn export_csv(
    AuthenticatedUser(actor): AuthenticatedUser,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let store = Arc::clone(&state.inventory);
    let items = run_blocking(move || store.list()).await?;
    let body = render_csv(&items)?;
    info!(user = %actor.username, rows = items.len(), "Inventory exported");

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"inventory.csv\""),
        ],
        body,
    ))
}

/// Header line plus one record per item, quoted where needed.
pub fn render_csv(items: &[InventoryItem]) -> ApiResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(ApiError::internal)?;
    for item in items {
        writer.serialize(item).map_err(ApiError::internal)?;
    }
    writer
        .into_inner()
        .map_err(|e| ApiError::internal(e.error()))
}
