//! Request bodies and their validation.

use super::error::{ApiError, ApiResult};
use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use shared_types::{ItemDraft, Role};

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(ApiError::payload_too_large("request body too large"))
            }
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

/// Body of `/register` and `/login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl CredentialsRequest {
    /// Username and password, if both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user, pass))
            }
            _ => None,
        }
    }

    /// Requested role, falling back to the default label.
    pub fn role(&self) -> Role {
        self.role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(Role::new)
            .unwrap_or_default()
    }
}

/// Body of add and edit requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemRequest {
    #[serde(default, alias = "name")]
    pub product_name: Option<String>,
    /// Integer, or a string holding one.
    #[serde(default)]
    pub quantity: Option<Value>,
}

impl ItemRequest {
    pub fn into_draft(self) -> ApiResult<ItemDraft> {
        let name = self
            .product_name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("product_name is required"))?;

        let quantity = match self.quantity {
            None | Some(Value::Null) => {
                return Err(ApiError::bad_request("quantity is required"));
            }
            Some(value) => coerce_quantity(&value)
                .ok_or_else(|| ApiError::bad_request("quantity must be an integer"))?,
        };

        Ok(ItemDraft::new(name, quantity))
    }
}

fn coerce_quantity(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
