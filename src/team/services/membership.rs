//! Team creation, invite-code joining, and member removal.

use crate::team::{
    domain::{InviteCode, Membership, Role, Team, TeamDomainError, TeamId, UserId},
    ports::{TaskCounter, TeamRepository, TeamRepositoryError},
    services::{LimitDecision, LimitGuard, LimitGuardError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for team management operations.
#[derive(Debug, Error)]
pub enum TeamServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TeamRepositoryError),

    /// No team carries the invite code.
    #[error("no team found for invite code '{0}'")]
    UnknownInviteCode(InviteCode),

    /// The subscription ceiling blocks the action.
    #[error("member limit reached: {}/{} on {} tier", .0.current, .0.limit.map_or_else(|| "unlimited".to_owned(), |limit| limit.to_string()), .0.tier)]
    LimitExceeded(LimitDecision),

    /// The actor's role does not permit the action.
    #[error("user {actor} may not perform this action in team {team}")]
    AuthorizationDenied {
        /// Acting user.
        actor: UserId,
        /// Team in which the action was attempted.
        team: TeamId,
    },

    /// The team owner cannot be removed from their own team.
    #[error("owner {owner} cannot be removed from team {team}")]
    CannotRemoveOwner {
        /// Owner user.
        owner: UserId,
        /// Team in question.
        team: TeamId,
    },
}

impl From<LimitGuardError> for TeamServiceError {
    fn from(err: LimitGuardError) -> Self {
        match err {
            LimitGuardError::TeamNotFound(team) => {
                Self::Repository(TeamRepositoryError::TeamNotFound(team))
            }
            LimitGuardError::Repository(inner) => Self::Repository(inner),
            LimitGuardError::Count(inner) => {
                Self::Repository(TeamRepositoryError::Persistence(Arc::new(inner)))
            }
        }
    }
}

/// Result type for team service operations.
pub type TeamServiceResult<T> = Result<T, TeamServiceError>;

/// Team management orchestration service.
#[derive(Clone)]
pub struct TeamService<R, TC, C>
where
    R: TeamRepository,
    TC: TaskCounter,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    limits: LimitGuard<R, TC>,
    clock: Arc<C>,
}

impl<R, TC, C> TeamService<R, TC, C>
where
    R: TeamRepository,
    TC: TaskCounter,
    C: Clock + Send + Sync,
{
    /// Creates a new team service.
    #[must_use]
    pub const fn new(repository: Arc<R>, limits: LimitGuard<R, TC>, clock: Arc<C>) -> Self {
        Self {
            repository,
            limits,
            clock,
        }
    }

    /// Creates a team on the free tier with the given owner and invite code.
    ///
    /// Invite code generation is owned by the embedding application.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError`] when the name fails validation or
    /// persistence rejects the team.
    pub async fn create_team(
        &self,
        name: impl Into<String> + Send,
        owner: UserId,
        invite_code: InviteCode,
    ) -> TeamServiceResult<Team> {
        let team = Team::new(name, owner, invite_code, &*self.clock)?;
        self.repository.store(&team).await?;
        Ok(team)
    }

    /// Joins a team via invite code as a regular member.
    ///
    /// Gated by the member limit for the team's tier.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::UnknownInviteCode`] for an unknown code,
    /// [`TeamServiceError::LimitExceeded`] when the team is full, or a
    /// repository error (including duplicate membership).
    pub async fn join_via_invite(
        &self,
        code: &InviteCode,
        user: UserId,
    ) -> TeamServiceResult<Membership> {
        let team = self
            .repository
            .find_by_invite_code(code)
            .await?
            .ok_or_else(|| TeamServiceError::UnknownInviteCode(code.clone()))?;

        let decision = self.limits.can_add_member(team.id()).await?;
        if !decision.allowed {
            return Err(TeamServiceError::LimitExceeded(decision));
        }

        let membership = Membership {
            team: team.id(),
            user,
            role: Role::Member,
        };
        self.repository.add_member(membership).await?;
        Ok(membership)
    }

    /// Removes a member from a team.
    ///
    /// The actor must hold a role with team management capability; the
    /// owner can never be removed.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::AuthorizationDenied`] when the actor
    /// lacks the capability, [`TeamServiceError::CannotRemoveOwner`] when
    /// the target is the owner, or a repository error.
    pub async fn remove_member(
        &self,
        team: TeamId,
        actor: UserId,
        target: UserId,
    ) -> TeamServiceResult<()> {
        let actor_role = self
            .repository
            .member_role(team, actor)
            .await?
            .filter(|role| role.can_manage_team())
            .ok_or(TeamServiceError::AuthorizationDenied { actor, team })?;

        let stored = self
            .repository
            .find_by_id(team)
            .await?
            .ok_or(TeamRepositoryError::TeamNotFound(team))?;
        if stored.owner() == target {
            return Err(TeamServiceError::CannotRemoveOwner {
                owner: target,
                team,
            });
        }

        tracing::debug!(%team, %actor, %target, role = %actor_role, "removing team member");
        self.repository.remove_member(team, target).await?;
        Ok(())
    }

    /// Exposes the limit guard for callers that only need decisions.
    #[must_use]
    pub const fn limits(&self) -> &LimitGuard<R, TC> {
        &self.limits
    }
}
