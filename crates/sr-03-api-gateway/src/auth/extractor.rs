//! Request extractor for authenticated routes.

use super::token::TokenAuthority;
use crate::domain::error::ApiError;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use shared_types::Identity;
use std::sync::Arc;

/// The verified caller. Handlers taking this argument never run for
/// unauthenticated requests.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<TokenAuthority>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authority = Arc::<TokenAuthority>::from_ref(state);
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| ApiError::forbidden("invalid token"))?,
            ),
            None => None,
        };
        authority.verify(header).map(AuthenticatedUser)
    }
}
