//! `POST /register` and `POST /login`.

use crate::blocking::run_blocking;
use crate::domain::{ApiError, ApiJson, ApiResult, CredentialsRequest, INVALID_CREDENTIALS};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Successful login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<Value>> {
    let (username, password) = req
        .credentials()
        .ok_or_else(|| ApiError::bad_request("username and password are required"))?;

    let hash = state.passwords.hash(password.to_string()).await?;
    let credentials = Arc::clone(&state.credentials);
    let (username, role) = (username.to_string(), req.role());
    let user = run_blocking(move || credentials.create_user(&username, &hash, &role)).await?;

    info!(user_id = user.id, username = %user.username, role = %user.role, "User registered");
    Ok(Json(json!({ "ok": true })))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let (username, password) = req
        .credentials()
        .ok_or_else(|| ApiError::bad_request(INVALID_CREDENTIALS))?;

    let credentials = Arc::clone(&state.credentials);
    let lookup = username.to_string();
    let user = run_blocking(move || credentials.find_by_username(&lookup)).await?;
    let verified = state
        .passwords
        .verify(
            password.to_string(),
            user.as_ref().map(|u| u.password_hash.clone()),
        )
        .await?;

    let user = match user {
        Some(user) if verified => user,
        _ => {
            info!(username, "Login rejected");
            return Err(ApiError::bad_request(INVALID_CREDENTIALS));
        }
    };

    let token = state.tokens.issue(&user.identity())?;
    info!(user_id = user.id, "Login succeeded");
    Ok(Json(TokenResponse { token }))
}
