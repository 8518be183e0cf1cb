//! API Gateway error types.
//!
//! Every failed request answers with `{"kind": "...", "message": "..."}` and
//! the status code belonging to its kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shared_types::StoreError;
use sr_02_notifications::NotificationError;
use std::fmt;
use thiserror::Error;
use tracing::error;

use super::config::ConfigError;

/// Login failure text, shared by unknown users and wrong passwords.
pub const INVALID_CREDENTIALS: &str = "invalid username or password";

/// Error category exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    BadRequest,
    NotFound,
    PayloadTooLarge,
    PersistenceError,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::PersistenceError | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Request-level error returned by handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// No credentials were presented
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Credentials were presented but rejected
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PayloadTooLarge, message)
    }

    /// Storage failed. The detail is logged, the client gets a generic text.
    pub fn persistence(detail: impl fmt::Display) -> Self {
        error!(error = %detail, "Persistence failure");
        Self::new(ErrorKind::PersistenceError, "failed to persist change")
    }

    /// Unexpected failure outside storage. The detail is logged only.
    pub fn internal(detail: impl fmt::Display) -> Self {
        error!(error = %detail, "Internal failure");
        Self::new(ErrorKind::Internal, "internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status().as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => Self::not_found(format!("item {id} not found")),
            StoreError::DuplicateUsername { .. } => Self::bad_request("username already exists"),
            other => Self::persistence(other),
        }
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised while assembling or running the service
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("password hashing setup failed: {0}")]
    Credentials(String),

    #[error("notification setup failed: {0}")]
    Notifications(#[from] NotificationError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}
