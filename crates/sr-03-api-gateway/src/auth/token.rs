//! Signed session tokens.

use crate::domain::config::AuthConfig;
use crate::domain::error::{ApiError, ApiResult};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::{Identity, Role, UserId};
use std::time::Duration;
use tracing::debug;

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 tokens with the process-wide secret.
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenAuthority {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.jwt_secret.as_bytes(), config.token_ttl())
    }

    /// Sign a token for `identity`.
    pub fn issue(&self, identity: &Identity) -> ApiResult<String> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            id: identity.user_id,
            username: identity.username.clone(),
            role: identity.role.clone(),
            iat: now,
            exp: now.saturating_add(ttl),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(ApiError::internal)
    }

    /// Verify the raw `Authorization` header value.
    ///
    /// A missing or blank header is `Unauthorized`; anything presented that
    /// fails verification is `Forbidden`. A `Bearer ` prefix is optional.
    pub fn verify(&self, header: Option<&str>) -> ApiResult<Identity> {
        let token = header
            .map(strip_bearer)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized("no token provided"))?;

        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "Token rejected");
            ApiError::forbidden("invalid token")
        })?;

        Ok(Identity {
            user_id: data.claims.id,
            username: data.claims.username,
            role: data.claims.role,
        })
    }
}

fn strip_bearer(header: &str) -> &str {
    let header = header.trim();
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim()
}
