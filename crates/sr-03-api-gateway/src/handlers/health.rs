//! `GET /health`

use axum::response::IntoResponse;
use axum::Json;

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "stockroom",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
