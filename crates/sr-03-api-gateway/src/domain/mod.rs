//! Domain layer: configuration, errors and request payloads.

pub mod config;
pub mod error;
pub mod payload;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ApiError, ApiResult, ErrorKind, GatewayError, INVALID_CREDENTIALS};
pub use payload::{ApiJson, CredentialsRequest, ItemRequest};
