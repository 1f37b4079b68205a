//! In-memory chat transport recording deliveries for tests.

use crate::notify::ports::{ChatTransport, TransportError};
use crate::team::domain::UserId;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Transport that records every delivery and can simulate failures for
/// chosen recipients.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    state: Arc<Mutex<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    deliveries: Vec<(UserId, String)>,
    failing: HashSet<UserId>,
}

impl RecordingTransport {
    /// Creates an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every delivery to the given recipient fail.
    pub fn fail_for(&self, recipient: UserId) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.insert(recipient);
        }
    }

    /// Returns all successful deliveries in order.
    #[must_use]
    pub fn deliveries(&self) -> Vec<(UserId, String)> {
        self.state
            .lock()
            .map_or_else(|_| Vec::new(), |state| state.deliveries.clone())
    }

    /// Returns the successful deliveries addressed to one recipient.
    #[must_use]
    pub fn deliveries_to(&self, recipient: UserId) -> Vec<String> {
        self.state.lock().map_or_else(
            |_| Vec::new(),
            |state| {
                state
                    .deliveries
                    .iter()
                    .filter(|(to, _)| *to == recipient)
                    .map(|(_, text)| text.clone())
                    .collect()
            },
        )
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn deliver(&self, recipient: UserId, text: &str) -> Result<(), TransportError> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| TransportError::new(recipient, err.to_string()))?;
        if state.failing.contains(&recipient) {
            return Err(TransportError::new(recipient, "recipient unreachable"));
        }
        state.deliveries.push((recipient, text.to_owned()));
        Ok(())
    }
}
