//! HTTP route handlers.

pub mod account;
pub mod client_state;
pub mod export;
pub mod health;
pub mod inventory;
