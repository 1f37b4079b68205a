//! Static configuration: subscription tier limits and scheduler knobs.
//!
//! The embedding process owns environment parsing; this module only defines
//! the serde-deserialisable shapes and their defaults. The defaults mirror
//! the hosted service's published plans.

use crate::team::domain::SubscriptionTier;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-tier resource ceilings and feature flags.
///
/// `None` limits mean unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Maximum member count, or `None` for unlimited.
    pub max_members: Option<u32>,
    /// Maximum simultaneously active (todo/in-progress) tasks, or `None`
    /// for unlimited.
    pub max_tasks: Option<u32>,
    /// Whether deadline reminders are included in the plan.
    pub reminders: bool,
    /// Whether calendar export is included in the plan.
    pub calendar_export: bool,
    /// Whether team analytics are included in the plan.
    pub analytics: bool,
}

impl TierLimits {
    /// Returns the limits table entry for a subscription tier.
    #[must_use]
    pub const fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Free => Self {
                max_members: Some(3),
                max_tasks: Some(20),
                reminders: false,
                calendar_export: false,
                analytics: false,
            },
            SubscriptionTier::Pro => Self {
                max_members: Some(15),
                max_tasks: None,
                reminders: true,
                calendar_export: true,
                analytics: true,
            },
            SubscriptionTier::Enterprise => Self {
                max_members: None,
                max_tasks: None,
                reminders: true,
                calendar_export: true,
                analytics: true,
            },
        }
    }
}

/// Errors raised while validating scheduler configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The sweep cadence does not match the reminder window width.
    ///
    /// A slower sweep lets deadlines slip through the narrow "now"
    /// window; a faster one re-queries windows for no gain.
    #[error("sweep interval of {actual_minutes} minutes must equal the {expected_minutes}-minute window width")]
    CadenceMismatch {
        /// Configured cadence in minutes.
        actual_minutes: i64,
        /// Required cadence in minutes.
        expected_minutes: i64,
    },

    /// The digest trigger time is not a valid wall-clock time.
    #[error("invalid digest trigger time {hour:02}:{minute:02}")]
    InvalidDigestTime {
        /// Configured hour component.
        hour: u32,
        /// Configured minute component.
        minute: u32,
    },
}

/// Timing configuration for the reminder scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Minutes between deadline sweeps. Must equal the window width.
    pub sweep_interval_minutes: i64,
    /// Hour of day (local process clock) at which the daily digest fires.
    pub digest_hour: u32,
    /// Minute of the digest hour.
    pub digest_minute: u32,
}

impl SchedulerConfig {
    /// Width of the narrowest reminder window, and therefore the only
    /// sweep cadence that neither skips deadlines nor over-queries.
    pub const WINDOW_WIDTH_MINUTES: i64 = 30;

    /// Validates the cadence/window coupling and the digest trigger time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CadenceMismatch`] when the sweep interval
    /// differs from the window width, or [`ConfigError::InvalidDigestTime`]
    /// when the digest trigger is not a real wall-clock time.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_interval_minutes != Self::WINDOW_WIDTH_MINUTES {
            return Err(ConfigError::CadenceMismatch {
                actual_minutes: self.sweep_interval_minutes,
                expected_minutes: Self::WINDOW_WIDTH_MINUTES,
            });
        }
        if self.digest_hour >= 24 || self.digest_minute >= 60 {
            return Err(ConfigError::InvalidDigestTime {
                hour: self.digest_hour,
                minute: self.digest_minute,
            });
        }
        Ok(())
    }

    /// Returns the sweep cadence as a [`Duration`].
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::minutes(self.sweep_interval_minutes)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            sweep_interval_minutes: Self::WINDOW_WIDTH_MINUTES,
            digest_hour: 9,
            digest_minute: 0,
        }
    }
}

/// Configuration for the task creation wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Minutes an untouched draft survives before it is discarded, or
    /// `None` to keep drafts indefinitely.
    pub draft_ttl_minutes: Option<i64>,
}

impl WizardConfig {
    /// Returns the draft time-to-live as a [`Duration`], if bounded.
    #[must_use]
    pub fn draft_ttl(&self) -> Option<Duration> {
        self.draft_ttl_minutes.map(Duration::minutes)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            draft_ttl_minutes: Some(30),
        }
    }
}
