//! Deadline-proximity windows.
//!
//! Sliding ranges recomputed from the sweep instant. The hour-wide far
//! windows deliberately overlap across consecutive 30-minute sweeps so a
//! deadline is never missed to timing jitter; the dispatch ledger turns
//! the resulting at-least-once matches into exactly-once notifications.
//! The sweep cadence must not exceed the narrowest window (enforced by
//! [`crate::config::SchedulerConfig::validate`]).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned while parsing window kinds from the dispatch ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown reminder window kind: {0}")]
pub struct ParseWindowKindError(pub String);

/// Named deadline-proximity bucket used by the reminder sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Deadline roughly a day away.
    TwentyFourHours,
    /// Deadline roughly three hours away.
    ThreeHours,
    /// Deadline is now, give or take fifteen minutes.
    Now,
}

impl WindowKind {
    /// All window kinds in sweep order.
    pub const ALL: [Self; 3] = [Self::TwentyFourHours, Self::ThreeHours, Self::Now];

    /// Returns the canonical ledger representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwentyFourHours => "24h",
            Self::ThreeHours => "3h",
            Self::Now => "now",
        }
    }

    /// Returns the window bounds `[start, end]` for a sweep at `now`.
    #[must_use]
    pub fn bounds(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match self {
            Self::TwentyFourHours => (
                now + Duration::hours(23) + Duration::minutes(30),
                now + Duration::hours(24) + Duration::minutes(30),
            ),
            Self::ThreeHours => (
                now + Duration::hours(2) + Duration::minutes(30),
                now + Duration::hours(3) + Duration::minutes(30),
            ),
            Self::Now => (now - Duration::minutes(15), now + Duration::minutes(15)),
        }
    }

    /// Whether a deadline falls inside this window for a sweep at `now`.
    #[must_use]
    pub fn contains(self, now: DateTime<Utc>, deadline: DateTime<Utc>) -> bool {
        let (start, end) = self.bounds(now);
        deadline >= start && deadline <= end
    }

    /// Urgency headline for the rendered reminder.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::TwentyFourHours => "Reminder",
            Self::ThreeHours => "Heads up!",
            Self::Now => "DEADLINE NOW",
        }
    }

    /// Urgency framing for the rendered reminder.
    #[must_use]
    pub const fn framing(self) -> &'static str {
        match self {
            Self::TwentyFourHours => "due tomorrow",
            Self::ThreeHours => "due soon",
            Self::Now => "due now",
        }
    }
}

impl TryFrom<&str> for WindowKind {
    type Error = ParseWindowKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "24h" => Ok(Self::TwentyFourHours),
            "3h" => Ok(Self::ThreeHours),
            "now" => Ok(Self::Now),
            _ => Err(ParseWindowKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
