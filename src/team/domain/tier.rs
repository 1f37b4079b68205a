//! Subscription tier enumeration.

use super::ParseTierError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription level bounding team size and active task count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    /// Entry tier with hard member and task ceilings.
    Free,
    /// Paid tier with a larger member ceiling and unlimited tasks.
    Pro,
    /// Unlimited tier.
    Enterprise,
}

impl SubscriptionTier {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }
}

impl TryFrom<&str> for SubscriptionTier {
    type Error = ParseTierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(ParseTierError(value.to_owned())),
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
