//! Notification fan-out service.

mod notifier;

pub use notifier::{DeliveryOutcome, Notifier};
