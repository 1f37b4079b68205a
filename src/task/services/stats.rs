//! Team and personal productivity statistics.
//!
//! Snapshots are computed from the task store on demand; rendering them
//! into chat text is left to the embedding surface.

use crate::task::{
    domain::{Task, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::team::{
    domain::{TeamId, UserId},
    ports::{TeamRepository, TeamRepositoryError},
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// How many recent top performers a team snapshot lists.
const TOP_MEMBER_LINES: usize = 3;

/// Errors returned by the statistics service.
#[derive(Debug, Error)]
pub enum TaskStatsError {
    /// The requesting user does not belong to the team.
    #[error("user {user} is not a member of team {team}")]
    NotATeamMember {
        /// Team whose statistics were requested.
        team: TeamId,
        /// Requesting user.
        user: UserId,
    },

    /// Task storage failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Team storage failed.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),
}

/// Result type for statistics operations.
pub type TaskStatsResult<T> = Result<T, TaskStatsError>;

/// Completion count for one member within the recent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberCompletions {
    /// The assignee.
    pub user: UserId,
    /// Tasks they completed in the last seven days.
    pub completed: usize,
}

/// Snapshot of a team's task activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStats {
    /// Every task ever created in the team.
    pub total: usize,
    /// Tasks currently todo or in progress.
    pub active: usize,
    /// Tasks completed in the last seven days.
    pub done_last_week: usize,
    /// Tasks completed in the last thirty days.
    pub done_last_month: usize,
    /// Active tasks whose deadline has passed.
    pub overdue: usize,
    /// Top performers of the last week, busiest first.
    pub top_members: Vec<MemberCompletions>,
}

/// Snapshot of one member's task activity within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    /// Assigned tasks waiting to be started.
    pub todo: usize,
    /// Assigned tasks in progress.
    pub in_progress: usize,
    /// Assigned tasks ever completed.
    pub completed: usize,
    /// Assigned tasks completed in the last seven days.
    pub done_last_week: usize,
    /// Assigned active tasks whose deadline has passed.
    pub overdue: usize,
    /// Share of completions that met their deadline, rounded to the
    /// nearest whole percent. Deadline-free completions count as on time.
    pub on_time_percent: usize,
}

/// On-demand statistics over the task store.
pub struct TaskStatsService<TR, TA, C>
where
    TR: TeamRepository,
    TA: TaskRepository,
    C: Clock + Send + Sync,
{
    teams: Arc<TR>,
    tasks: Arc<TA>,
    clock: Arc<C>,
}

impl<TR, TA, C> TaskStatsService<TR, TA, C>
where
    TR: TeamRepository,
    TA: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a statistics service over the given repositories.
    #[must_use]
    pub const fn new(teams: Arc<TR>, tasks: Arc<TA>, clock: Arc<C>) -> Self {
        Self {
            teams,
            tasks,
            clock,
        }
    }

    /// Computes a team activity snapshot for a member.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStatsError::NotATeamMember`] when the requester does
    /// not belong to the team, or a repository error.
    pub async fn team_stats(&self, team: TeamId, actor: UserId) -> TaskStatsResult<TeamStats> {
        self.require_membership(team, actor).await?;
        let now = self.clock.utc();
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);
        let tasks = self.tasks.find_by_team(team).await?;

        let mut completions: HashMap<UserId, usize> = HashMap::new();
        for task in &tasks {
            if completed_since(task, week_ago) {
                if let Some(assignee) = task.assignee() {
                    *completions.entry(assignee).or_insert(0) += 1;
                }
            }
        }
        let mut top_members: Vec<MemberCompletions> = completions
            .into_iter()
            .map(|(user, completed)| MemberCompletions { user, completed })
            .collect();
        top_members.sort_by(|a, b| b.completed.cmp(&a.completed).then(a.user.cmp(&b.user)));
        top_members.truncate(TOP_MEMBER_LINES);

        Ok(TeamStats {
            total: tasks.len(),
            active: tasks
                .iter()
                .filter(|task| !task.status().is_terminal())
                .count(),
            done_last_week: tasks
                .iter()
                .filter(|task| completed_since(task, week_ago))
                .count(),
            done_last_month: tasks
                .iter()
                .filter(|task| completed_since(task, month_ago))
                .count(),
            overdue: tasks.iter().filter(|task| is_overdue(task, now)).count(),
            top_members,
        })
    }

    /// Computes a member's personal snapshot within a team.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStatsError::NotATeamMember`] when the user does not
    /// belong to the team, or a repository error.
    pub async fn user_stats(&self, team: TeamId, user: UserId) -> TaskStatsResult<UserStats> {
        self.require_membership(team, user).await?;
        let now = self.clock.utc();
        let week_ago = now - Duration::days(7);
        let tasks = self.tasks.find_by_team(team).await?;
        let mine: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.assignee() == Some(user))
            .collect();

        let completed = mine
            .iter()
            .filter(|task| task.status() == TaskStatus::Done)
            .count();
        let on_time = mine
            .iter()
            .filter(|task| task.status() == TaskStatus::Done && met_deadline(task))
            .count();

        Ok(UserStats {
            todo: mine
                .iter()
                .filter(|task| task.status() == TaskStatus::Todo)
                .count(),
            in_progress: mine
                .iter()
                .filter(|task| task.status() == TaskStatus::InProgress)
                .count(),
            completed,
            done_last_week: mine
                .iter()
                .filter(|task| completed_since(task, week_ago))
                .count(),
            overdue: mine.iter().filter(|task| is_overdue(task, now)).count(),
            on_time_percent: rounded_percent(on_time, completed),
        })
    }

    async fn require_membership(&self, team: TeamId, user: UserId) -> TaskStatsResult<()> {
        if self.teams.member_role(team, user).await?.is_none() {
            return Err(TaskStatsError::NotATeamMember { team, user });
        }
        Ok(())
    }
}

fn completed_since(task: &Task, cutoff: DateTime<Utc>) -> bool {
    task.status() == TaskStatus::Done && task.completed_at().is_some_and(|at| at >= cutoff)
}

fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.status().is_terminal() && task.deadline().is_some_and(|deadline| deadline < now)
}

fn met_deadline(task: &Task) -> bool {
    task.deadline()
        .is_none_or(|deadline| task.completed_at().is_some_and(|at| at <= deadline))
}

/// Rounds `part / whole` to the nearest whole percent; zero when `whole`
/// is zero.
fn rounded_percent(part: usize, whole: usize) -> usize {
    (part * 200 + whole)
        .checked_div(whole * 2)
        .unwrap_or_default()
}
