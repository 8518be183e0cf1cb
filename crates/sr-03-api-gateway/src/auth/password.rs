//! Password hashing on the blocking pool.

use crate::domain::error::{ApiError, ApiResult};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Argon2id hashing with a fixed cost.
///
/// Unknown usernames are verified against a throwaway hash so that a failed
/// login costs the same whether or not the account exists.
#[derive(Clone)]
pub struct PasswordHashing {
    argon2: Argon2<'static>,
    dummy_hash: String,
}

impl PasswordHashing {
    /// Hashing with the library's recommended parameters.
    pub fn new() -> Result<Self, argon2::password_hash::Error> {
        Self::with_params(Params::default())
    }

    /// Hashing with explicit cost parameters.
    pub fn with_params(params: Params) -> Result<Self, argon2::password_hash::Error> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = argon2
            .hash_password(b"placeholder-password", &salt)?
            .to_string();
        Ok(Self { argon2, dummy_hash })
    }

    /// Cheapest valid parameters, for tests.
    pub fn minimal() -> Result<Self, argon2::password_hash::Error> {
        let params = Params::new(
            Params::MIN_M_COST,
            Params::MIN_T_COST,
            Params::MIN_P_COST,
            None,
        )?;
        Self::with_params(params)
    }

    /// Produce a PHC string for `password`.
    pub async fn hash(&self, password: String) -> ApiResult<String> {
        let argon2 = self.argon2.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
        })
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)
    }

    /// Check `password` against `stored`, or against the throwaway hash when
    /// there is no stored hash. The latter always yields `false`.
    pub async fn verify(&self, password: String, stored: Option<String>) -> ApiResult<bool> {
        let known = stored.is_some();
        let hash = stored.unwrap_or_else(|| self.dummy_hash.clone());
        let argon2 = self.argon2.clone();

        let matched = tokio::task::spawn_blocking(move || {
            PasswordHash::new(&hash)
                .map(|parsed| argon2.verify_password(password.as_bytes(), &parsed).is_ok())
                .unwrap_or(false)
        })
        .await
        .map_err(ApiError::internal)?;

        Ok(known && matched)
    }
}
