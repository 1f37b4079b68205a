//! Limit guard: subscription-tier ceilings for tasks and members.
//!
//! Pure reads against stored counts and the static tier table. A team at
//! its ceiling is not an error; denial is data carried back to the caller
//! so user-facing surfaces can show current/limit/tier.

use crate::config::TierLimits;
use crate::team::{
    domain::{SubscriptionTier, TeamId},
    ports::{TaskCountError, TaskCounter, TeamRepository, TeamRepositoryError},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Structured allow/deny decision for a limited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitDecision {
    /// Whether the action may proceed.
    pub allowed: bool,
    /// Current count of the limited resource.
    pub current: u32,
    /// Ceiling for the team's tier, or `None` when unlimited.
    pub limit: Option<u32>,
    /// The team's subscription tier at decision time.
    pub tier: SubscriptionTier,
}

impl LimitDecision {
    fn evaluate(current: u32, limit: Option<u32>, tier: SubscriptionTier) -> Self {
        Self {
            allowed: limit.is_none_or(|ceiling| current < ceiling),
            current,
            limit,
            tier,
        }
    }
}

/// Errors returned by limit guard lookups.
///
/// A denied action is not an error; these cover missing teams and storage
/// failures only.
#[derive(Debug, Clone, Error)]
pub enum LimitGuardError {
    /// The team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// Team repository failure.
    #[error(transparent)]
    Repository(#[from] TeamRepositoryError),

    /// Task count lookup failure.
    #[error(transparent)]
    Count(#[from] TaskCountError),
}

/// Result type for limit guard operations.
pub type LimitGuardResult<T> = Result<T, LimitGuardError>;

/// Subscription limit guard.
#[derive(Clone)]
pub struct LimitGuard<R, C>
where
    R: TeamRepository,
    C: TaskCounter,
{
    teams: Arc<R>,
    task_counts: Arc<C>,
}

impl<R, C> LimitGuard<R, C>
where
    R: TeamRepository,
    C: TaskCounter,
{
    /// Creates a new limit guard.
    #[must_use]
    pub const fn new(teams: Arc<R>, task_counts: Arc<C>) -> Self {
        Self { teams, task_counts }
    }

    /// Decides whether one more task may be created in the team.
    ///
    /// # Errors
    ///
    /// Returns [`LimitGuardError::TeamNotFound`] when the team is absent,
    /// or a repository/count error when storage fails.
    pub async fn can_create_task(&self, team: TeamId) -> LimitGuardResult<LimitDecision> {
        let tier = self.tier_of(team).await?;
        let limits = TierLimits::for_tier(tier);
        let current = self.task_counts.active_task_count(team).await?;
        Ok(LimitDecision::evaluate(current, limits.max_tasks, tier))
    }

    /// Decides whether one more member may join the team.
    ///
    /// # Errors
    ///
    /// Returns [`LimitGuardError::TeamNotFound`] when the team is absent,
    /// or a repository error when storage fails.
    pub async fn can_add_member(&self, team: TeamId) -> LimitGuardResult<LimitDecision> {
        let tier = self.tier_of(team).await?;
        let limits = TierLimits::for_tier(tier);
        let current = self.teams.member_count(team).await?;
        Ok(LimitDecision::evaluate(current, limits.max_members, tier))
    }

    async fn tier_of(&self, team: TeamId) -> LimitGuardResult<SubscriptionTier> {
        let stored = self
            .teams
            .find_by_id(team)
            .await?
            .ok_or(LimitGuardError::TeamNotFound(team))?;
        Ok(stored.tier())
    }
}
