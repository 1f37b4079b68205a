//! Team aggregate root.

use super::{InviteCode, SubscriptionTier, TeamDomainError, TeamId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MAX_TEAM_NAME_CHARS: usize = 100;

/// Team aggregate root.
///
/// The owner is always also a member with role `Owner`; there is exactly
/// one owner per team at all times. Ownership transfer is not modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    owner: UserId,
    invite_code: InviteCode,
    tier: SubscriptionTier,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted team aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted team identifier.
    pub id: TeamId,
    /// Persisted display name.
    pub name: String,
    /// Persisted owner user.
    pub owner: UserId,
    /// Persisted invite code.
    pub invite_code: InviteCode,
    /// Persisted subscription tier.
    pub tier: SubscriptionTier,
    /// Persisted subscription expiry, if bounded.
    pub expires_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new team on the free tier.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::InvalidTeamName`] when the trimmed name is
    /// empty or longer than 100 characters.
    pub fn new(
        name: impl Into<String>,
        owner: UserId,
        invite_code: InviteCode,
        clock: &impl Clock,
    ) -> Result<Self, TeamDomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_TEAM_NAME_CHARS {
            return Err(TeamDomainError::InvalidTeamName);
        }
        Ok(Self {
            id: TeamId::new(),
            name: trimmed.to_owned(),
            owner,
            invite_code,
            tier: SubscriptionTier::Free,
            expires_at: None,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            owner: data.owner,
            invite_code: data.invite_code,
            tier: data.tier,
            expires_at: data.expires_at,
            created_at: data.created_at,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the invite code.
    #[must_use]
    pub const fn invite_code(&self) -> &InviteCode {
        &self.invite_code
    }

    /// Returns the subscription tier.
    #[must_use]
    pub const fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    /// Returns the subscription expiry, if bounded.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Changes the subscription tier, optionally with an expiry.
    pub fn set_tier(&mut self, tier: SubscriptionTier, expires_at: Option<DateTime<Utc>>) {
        self.tier = tier;
        self.expires_at = expires_at;
    }
}
