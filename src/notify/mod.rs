//! Notification rendering and delivery fan-out.
//!
//! The chat transport is an external collaborator behind
//! [`ports::ChatTransport`]; this module owns failure bookkeeping only.
//! Delivery is fire-and-forget: one attempt per notification, no retry,
//! no backpressure. Failures are logged and never surfaced to the user
//! whose action triggered the notification.

pub mod adapters;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
