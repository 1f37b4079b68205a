//! Deterministic clock support shared by unit and integration tests.
//!
//! Production code receives time through [`mockable::Clock`]; tests that
//! exercise wall-clock behaviour (deadline validation, reminder windows,
//! draft expiry) pin the clock to a known instant with [`FixedClock`].

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::RwLock;

/// Clock that reports a fixed, externally controlled instant.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Creates a clock pinned to the given `(year, month, day, hour, minute)`
    /// in UTC.
    ///
    /// Falls back to the Unix epoch when the components do not name a real
    /// instant, so fixtures never panic.
    #[must_use]
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self::new(instant)
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.write() {
            *guard = now;
        }
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, delta: chrono::Duration) {
        if let Ok(mut guard) = self.now.write() {
            *guard += delta;
        }
    }

    fn current(&self) -> DateTime<Utc> {
        self.now
            .read()
            .map_or(DateTime::<Utc>::UNIX_EPOCH, |guard| *guard)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.current().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.current()
    }
}
