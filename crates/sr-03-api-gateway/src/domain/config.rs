//! Service configuration with validation.
//!
//! Every setting has a default except the token signing secret, which must
//! be supplied. [`ServiceConfig::from_env`] is the production entry point.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Placeholder secret shipped with early deployments. Refused at startup.
pub const PLACEHOLDER_SECRET: &str = "super_secret_key";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener and static files
    pub http: HttpConfig,
    /// Token signing
    pub auth: AuthConfig,
    /// On-disk locations
    pub storage: StorageConfig,
    /// Outbound webhooks
    pub webhooks: WebhookConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Request limits
    pub limits: LimitsConfig,
}

impl ServiceConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Unset and empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.http.host = parse_var("HOST", &host)?;
        }
        if let Some(port) = get("PORT") {
            config.http.port = parse_var("PORT", &port)?;
        }
        config.http.static_dir = get("STATIC_DIR").map(PathBuf::from);

        if let Some(secret) = lookup("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Some(ttl) = get("TOKEN_TTL_SECS") {
            config.auth.token_ttl_secs = parse_var("TOKEN_TTL_SECS", &ttl)?;
        }

        if let Some(path) = get("DATABASE_PATH") {
            config.storage.database_path = PathBuf::from(path);
        }
        if let Some(path) = get("STATE_FILE") {
            config.storage.state_file = PathBuf::from(path);
        }
        if let Some(path) = get("LIVE_MSG_FILE") {
            config.storage.live_message_file = PathBuf::from(path);
        }

        config.webhooks.log_url = get("WEBHOOK_LOG");
        config.webhooks.live_url = get("WEBHOOK_LIVE");
        if let Some(secs) = get("WEBHOOK_TIMEOUT_SECS") {
            config.webhooks.timeout_secs = parse_var("WEBHOOK_TIMEOUT_SECS", &secs)?;
        }

        if let Some(origins) = get("CORS_ORIGINS") {
            config.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(limit) = get("BODY_LIMIT_BYTES") {
            config.limits.body_limit_bytes = parse_var("BODY_LIMIT_BYTES", &limit)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret = self.auth.jwt_secret.trim();
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if secret == PLACEHOLDER_SECRET {
            return Err(ConfigError::PlaceholderSecret);
        }

        if self.auth.token_ttl_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "token_ttl_secs cannot be 0".into(),
            ));
        }

        if self.webhooks.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(
                "webhook timeout cannot be 0".into(),
            ));
        }

        if self.limits.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "body_limit_bytes cannot be 0".into(),
            ));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::InvalidLimit(
                "at least one CORS origin is required".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 3000)
    pub port: u16,
    /// Directory served for paths no route matches
    pub static_dir: Option<PathBuf>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            static_dir: None,
        }
    }
}

/// Token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing key
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 86_400,
        }
    }
}

/// On-disk locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database holding users and inventory
    pub database_path: PathBuf,
    /// Client state document
    pub state_file: PathBuf,
    /// Id of the current live summary message
    pub live_message_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./database.db"),
            state_file: PathBuf::from("./state.json"),
            live_message_file: PathBuf::from("./liveMessageId.txt"),
        }
    }
}

/// Outbound webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Audit log channel
    pub log_url: Option<String>,
    /// Live summary channel
    pub live_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl WebhookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether any channel is configured.
    pub fn any_enabled(&self) -> bool {
        self.log_url.is_some() || self.live_url.is_some()
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            log_url: None,
            live_url: None,
            timeout_secs: 10,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins (`*` for any)
    pub allowed_origins: Vec<String>,
    /// Preflight cache lifetime in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age: 3600,
        }
    }
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes (default: 2 MiB)
    pub body_limit_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set")]
    MissingSecret,

    #[error("JWT_SECRET is the well-known placeholder; choose a private secret")]
    PlaceholderSecret,

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}
