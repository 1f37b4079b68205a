//! Repository port for team and membership persistence.

use crate::team::domain::{
    InviteCode, Membership, MembershipListing, Role, SubscriptionTier, Team, TeamId, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for team repository operations.
pub type TeamRepositoryResult<T> = Result<T, TeamRepositoryError>;

/// Team and membership persistence contract.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Stores a new team together with its owner membership.
    ///
    /// The owner membership (role `Owner`) is written in the same operation
    /// so a team is never observable without its owner.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::DuplicateTeam`] when the team ID
    /// already exists or [`TeamRepositoryError::DuplicateInviteCode`] when
    /// the invite code is taken.
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()>;

    /// Finds a team by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>>;

    /// Finds a team by invite code. Returns `None` when absent.
    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> TeamRepositoryResult<Option<Team>>;

    /// Persists a subscription tier change.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::TeamNotFound`] when the team does not
    /// exist.
    async fn set_tier(
        &self,
        team: TeamId,
        tier: SubscriptionTier,
        expires_at: Option<DateTime<Utc>>,
    ) -> TeamRepositoryResult<()>;

    /// Adds a membership.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::DuplicateMembership`] when the
    /// (team, user) pair already exists and
    /// [`TeamRepositoryError::TeamNotFound`] when the team is absent.
    async fn add_member(&self, membership: Membership) -> TeamRepositoryResult<()>;

    /// Removes a membership.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRepositoryError::MembershipNotFound`] when the pair is
    /// absent.
    async fn remove_member(&self, team: TeamId, user: UserId) -> TeamRepositoryResult<()>;

    /// Lists all memberships of a team.
    async fn members(&self, team: TeamId) -> TeamRepositoryResult<Vec<Membership>>;

    /// Returns the role of a user within a team, or `None` when the user is
    /// not a member.
    async fn member_role(&self, team: TeamId, user: UserId)
        -> TeamRepositoryResult<Option<Role>>;

    /// Counts the members of a team.
    async fn member_count(&self, team: TeamId) -> TeamRepositoryResult<u32>;

    /// Lists every membership across all teams with the team display name.
    ///
    /// Feeds the daily digest's per-user grouping.
    async fn memberships(&self) -> TeamRepositoryResult<Vec<MembershipListing>>;
}

/// Errors returned by team repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TeamRepositoryError {
    /// A team with the same identifier already exists.
    #[error("duplicate team identifier: {0}")]
    DuplicateTeam(TeamId),

    /// The invite code is already assigned to another team.
    #[error("duplicate invite code: {0}")]
    DuplicateInviteCode(InviteCode),

    /// The (team, user) membership already exists.
    #[error("user {user} is already a member of team {team}")]
    DuplicateMembership {
        /// Team of the conflicting membership.
        team: TeamId,
        /// User of the conflicting membership.
        user: UserId,
    },

    /// The team was not found.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// The membership was not found.
    #[error("user {user} is not a member of team {team}")]
    MembershipNotFound {
        /// Team that was searched.
        team: TeamId,
        /// User that was searched.
        user: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TeamRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
