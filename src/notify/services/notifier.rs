//! Thin fan-out over the external chat transport.
//!
//! One delivery attempt per notification. A failure is terminal for that
//! notification: it is logged with the recipient and reason, reported to
//! the caller as an outcome, and never retried or surfaced to the user
//! whose action triggered it.

use crate::notify::ports::{
    AssignmentView, ChatTransport, CommentView, DigestView, NotificationRenderer, ReminderView,
    StatusChangeView,
};
use crate::team::domain::UserId;
use std::sync::Arc;

/// Per-recipient result of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the message.
    Delivered,
    /// Rendering or the transport failed; details are in the log.
    Failed,
}

impl DeliveryOutcome {
    /// Whether the message was handed to the transport successfully.
    #[must_use]
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Notification fan-out service.
#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn ChatTransport>,
    renderer: Arc<dyn NotificationRenderer>,
}

impl Notifier {
    /// Creates a notifier over a transport and a renderer.
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>, renderer: Arc<dyn NotificationRenderer>) -> Self {
        Self {
            transport,
            renderer,
        }
    }

    /// Attempts to deliver already-rendered text to a recipient.
    pub async fn send(&self, recipient: UserId, text: &str) -> DeliveryOutcome {
        match self.transport.deliver(recipient, text).await {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(error) => {
                tracing::warn!(%recipient, %error, "notification delivery failed");
                DeliveryOutcome::Failed
            }
        }
    }

    /// Renders and delivers an assignment notification.
    pub async fn notify_assignment(
        &self,
        recipient: UserId,
        view: &AssignmentView,
    ) -> DeliveryOutcome {
        match self.renderer.render_assignment(view) {
            Ok(text) => self.send(recipient, &text).await,
            Err(error) => {
                tracing::warn!(%recipient, %error, "assignment rendering failed");
                DeliveryOutcome::Failed
            }
        }
    }

    /// Renders and delivers a status-change notification.
    pub async fn notify_status_change(
        &self,
        recipient: UserId,
        view: &StatusChangeView,
    ) -> DeliveryOutcome {
        match self.renderer.render_status_change(view) {
            Ok(text) => self.send(recipient, &text).await,
            Err(error) => {
                tracing::warn!(%recipient, %error, "status-change rendering failed");
                DeliveryOutcome::Failed
            }
        }
    }

    /// Renders and delivers a new-comment notification.
    pub async fn notify_comment(&self, recipient: UserId, view: &CommentView) -> DeliveryOutcome {
        match self.renderer.render_comment(view) {
            Ok(text) => self.send(recipient, &text).await,
            Err(error) => {
                tracing::warn!(%recipient, %error, "comment rendering failed");
                DeliveryOutcome::Failed
            }
        }
    }

    /// Renders and delivers a deadline reminder.
    pub async fn notify_reminder(&self, recipient: UserId, view: &ReminderView) -> DeliveryOutcome {
        match self.renderer.render_reminder(view) {
            Ok(text) => self.send(recipient, &text).await,
            Err(error) => {
                tracing::warn!(%recipient, %error, "reminder rendering failed");
                DeliveryOutcome::Failed
            }
        }
    }

    /// Renders and delivers a daily digest.
    pub async fn notify_digest(&self, recipient: UserId, view: &DigestView) -> DeliveryOutcome {
        match self.renderer.render_digest(view) {
            Ok(text) => self.send(recipient, &text).await,
            Err(error) => {
                tracing::warn!(%recipient, %error, "digest rendering failed");
                DeliveryOutcome::Failed
            }
        }
    }
}
