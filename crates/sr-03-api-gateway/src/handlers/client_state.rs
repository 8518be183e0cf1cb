//! `GET /api/state` and `POST /api/state`: the whole-document client state.

use crate::blocking::run_blocking;
use crate::domain::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;
use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

pub async fn read_state(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let file = Arc::clone(&state.state_file);
    let doc = run_blocking(move || Ok(file.read())).await?;
    Ok(([(CACHE_CONTROL, "no-store")], Json(doc)))
}

pub async fn write_state(
    State(state): State<AppState>,
    ApiJson(doc): ApiJson<Value>,
) -> ApiResult<Json<Value>> {
    if !doc.is_object() {
        return Err(ApiError::bad_request("Invalid state"));
    }

    let file = Arc::clone(&state.state_file);
    run_blocking(move || file.write(&doc)).await?;
    info!(path = %state.state_file.path().display(), "Client state saved");
    Ok(Json(json!({ "ok": true })))
}
