//! Membership relation and role capabilities.

use super::{ParseRoleError, TeamId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user within a team.
///
/// A closed enumeration with capability methods; callers never compare
/// role strings directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The single team owner. Always also a member.
    Owner,
    /// Elevated member able to manage tasks and membership.
    Admin,
    /// Regular member.
    Member,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Whether this role may change team settings and remove members.
    #[must_use]
    pub const fn can_manage_team(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Whether this role may delete a task it did not author.
    #[must_use]
    pub const fn can_remove_any_task(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (team, user, role) relation, unique per (team, user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Team the membership belongs to.
    pub team: TeamId,
    /// Member user.
    pub user: UserId,
    /// Role gating privileged actions.
    pub role: Role,
}

/// Denormalised membership row used by the daily digest.
///
/// Carries the team name so digest rendering needs no extra lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipListing {
    /// Member user.
    pub user: UserId,
    /// Team the membership belongs to.
    pub team: TeamId,
    /// Display name of the team.
    pub team_name: String,
}
