//! Chat transport port.

use crate::team::domain::UserId;
use async_trait::async_trait;
use thiserror::Error;

/// Error reported by the external chat transport for a failed delivery.
///
/// The transport's failure detail is opaque to the core; it is carried for
/// logging only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("delivery to {recipient} failed: {reason}")]
pub struct TransportError {
    /// Intended recipient.
    pub recipient: UserId,
    /// Transport-supplied failure description.
    pub reason: String,
}

impl TransportError {
    /// Creates a transport error.
    #[must_use]
    pub fn new(recipient: UserId, reason: impl Into<String>) -> Self {
        Self {
            recipient,
            reason: reason.into(),
        }
    }
}

/// Message delivery contract exposed by the external chat platform.
///
/// Called once per notification; the core owns no retries.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Attempts to deliver rendered text to a recipient.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the platform reports a failed send.
    async fn deliver(&self, recipient: UserId, text: &str) -> Result<(), TransportError>;
}
