// Allow missing docs for internal items in development
#![allow(missing_docs)]

//! SR-03 API Gateway - the HTTP and WebSocket surface of the inventory service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        API GATEWAY (sr-03)                           │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │  BodyLimit → CORS → Tracing                                          │
//! │        │                                                             │
//! │  ┌─────┴─────────┬──────────────────┬───────────────┬─────────────┐  │
//! │  │ /register     │ /inventory*      │ /api/state    │ /ws         │  │
//! │  │ /login        │ /export          │               │             │  │
//! │  └─────┬─────────┴────────┬─────────┴───────┬───────┴──────┬──────┘  │
//! │        │        AuthenticatedUser           │              │         │
//! │        │                  │                 │              │         │
//! │  CredentialStore   MutationPipeline     StateFile     Subscription   │
//! └──────────────────────────┼───────────────────────────────────┬───────┘
//!                            │                                   │
//!            InventoryStore ─┼─ NotificationSink ─ EventBus ─────┘
//! ```
//!
//! # Authentication
//!
//! - `/register`, `/login`, `/api/state`, `/ws`, `/health`: public
//! - `/inventory*`, `/export`: token required (missing → 401, invalid → 403)

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod auth;
pub mod blocking;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod router;
pub mod service;
pub mod state;
pub mod ws;

// Re-exports for public API
pub use auth::{AuthenticatedUser, PasswordHashing, TokenAuthority};
pub use domain::config::ServiceConfig;
pub use domain::error::{ApiError, ApiResult, ErrorKind, GatewayError};
pub use pipeline::MutationPipeline;
pub use router::build_router;
pub use service::ApiGatewayService;
pub use state::{AppState, Backends};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
