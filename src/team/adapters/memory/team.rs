//! Thread-safe in-memory implementation of [`TeamRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::team::{
    domain::{
        InviteCode, Membership, MembershipListing, Role, SubscriptionTier, Team, TeamId, UserId,
    },
    ports::{TeamRepository, TeamRepositoryError, TeamRepositoryResult},
};

/// Thread-safe in-memory team repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    state: Arc<RwLock<InMemoryTeamState>>,
}

#[derive(Debug, Default)]
struct InMemoryTeamState {
    teams: HashMap<TeamId, Team>,
    invite_index: HashMap<InviteCode, TeamId>,
    memberships: HashMap<(TeamId, UserId), Role>,
}

impl InMemoryTeamRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> TeamRepositoryError {
    TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.teams.contains_key(&team.id()) {
            return Err(TeamRepositoryError::DuplicateTeam(team.id()));
        }
        if state.invite_index.contains_key(team.invite_code()) {
            return Err(TeamRepositoryError::DuplicateInviteCode(
                team.invite_code().clone(),
            ));
        }
        state
            .invite_index
            .insert(team.invite_code().clone(), team.id());
        state
            .memberships
            .insert((team.id(), team.owner()), Role::Owner);
        state.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.teams.get(&id).cloned())
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> TeamRepositoryResult<Option<Team>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let team = state
            .invite_index
            .get(code)
            .and_then(|team_id| state.teams.get(team_id))
            .cloned();
        Ok(team)
    }

    async fn set_tier(
        &self,
        team: TeamId,
        tier: SubscriptionTier,
        expires_at: Option<DateTime<Utc>>,
    ) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let stored = state
            .teams
            .get_mut(&team)
            .ok_or(TeamRepositoryError::TeamNotFound(team))?;
        stored.set_tier(tier, expires_at);
        Ok(())
    }

    async fn add_member(&self, membership: Membership) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.teams.contains_key(&membership.team) {
            return Err(TeamRepositoryError::TeamNotFound(membership.team));
        }
        let key = (membership.team, membership.user);
        if state.memberships.contains_key(&key) {
            return Err(TeamRepositoryError::DuplicateMembership {
                team: membership.team,
                user: membership.user,
            });
        }
        state.memberships.insert(key, membership.role);
        Ok(())
    }

    async fn remove_member(&self, team: TeamId, user: UserId) -> TeamRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state
            .memberships
            .remove(&(team, user))
            .map(|_| ())
            .ok_or(TeamRepositoryError::MembershipNotFound { team, user })
    }

    async fn members(&self, team: TeamId) -> TeamRepositoryResult<Vec<Membership>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut members: Vec<Membership> = state
            .memberships
            .iter()
            .filter(|((member_team, _), _)| *member_team == team)
            .map(|(&(member_team, user), &role)| Membership {
                team: member_team,
                user,
                role,
            })
            .collect();
        members.sort_by_key(|membership| membership.user);
        Ok(members)
    }

    async fn member_role(
        &self,
        team: TeamId,
        user: UserId,
    ) -> TeamRepositoryResult<Option<Role>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.memberships.get(&(team, user)).copied())
    }

    async fn member_count(&self, team: TeamId) -> TeamRepositoryResult<u32> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let count = state
            .memberships
            .keys()
            .filter(|(member_team, _)| *member_team == team)
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn memberships(&self) -> TeamRepositoryResult<Vec<MembershipListing>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut listings: Vec<MembershipListing> = state
            .memberships
            .keys()
            .filter_map(|&(team, user)| {
                state.teams.get(&team).map(|stored| MembershipListing {
                    user,
                    team,
                    team_name: stored.name().to_owned(),
                })
            })
            .collect();
        listings.sort_by_key(|listing| (listing.user, listing.team.into_inner()));
        Ok(listings)
    }
}
