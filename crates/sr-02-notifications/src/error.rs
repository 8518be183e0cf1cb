//! Notification error types.

use thiserror::Error;

/// Errors raised while delivering a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// A configured webhook URL could not be parsed.
    #[error("invalid webhook URL: {0}")]
    InvalidUrl(String),

    /// Connection, timeout or non-success status from the webhook endpoint.
    #[error("webhook transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered but not with the expected message object.
    #[error("malformed webhook response: {0}")]
    MalformedResponse(String),

    /// The live message handle could not be persisted.
    #[error("live message handle I/O error: {0}")]
    Handle(#[from] std::io::Error),

    /// Raised by test sinks configured to fail.
    #[error("notification sink unavailable")]
    Unavailable,
}
