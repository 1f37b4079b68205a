//! Post-creation task lifecycle: status transitions, field edits,
//! comments, and deletion with its cascades.

use crate::notify::ports::{CommentView, StatusChangeView};
use crate::notify::services::Notifier;
use crate::reminder::ports::{DispatchLedger, DispatchLedgerError};
use crate::task::domain::{Comment, Task, TaskDomainError, TaskFieldEdits, TaskId, TaskStatus};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::team::domain::{TeamId, UserId};
use crate::team::ports::{TeamRepository, TeamRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The acting user is not a member of the task's team.
    #[error("user {user} is not a member of team {team}")]
    NotATeamMember {
        /// The task's team.
        team: TeamId,
        /// The non-member user.
        user: UserId,
    },

    /// The acting user may not perform this operation on this task.
    #[error("user {actor} may not delete task {task}")]
    DeletionDenied {
        /// The task the actor tried to delete.
        task: TaskId,
        /// The refused user.
        actor: UserId,
    },

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Team repository failure.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),

    /// Dispatch ledger failure during the delete cascade.
    #[error(transparent)]
    Ledger(#[from] DispatchLedgerError),
}

/// Result type for lifecycle operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle service.
///
/// Every operation loads the task, checks the actor's membership in the
/// owning team, applies the domain mutation, and persists it. Notifications
/// are best-effort and never fail the operation.
pub struct TaskLifecycleService<TR, TA, L, C>
where
    TR: TeamRepository,
    TA: TaskRepository,
    L: DispatchLedger,
    C: Clock + Send + Sync,
{
    teams: Arc<TR>,
    tasks: Arc<TA>,
    ledger: Arc<L>,
    notifier: Notifier,
    clock: Arc<C>,
}

impl<TR, TA, L, C> TaskLifecycleService<TR, TA, L, C>
where
    TR: TeamRepository,
    TA: TaskRepository,
    L: DispatchLedger,
    C: Clock + Send + Sync,
{
    /// Creates a lifecycle service over the given stores.
    #[must_use]
    pub const fn new(
        teams: Arc<TR>,
        tasks: Arc<TA>,
        ledger: Arc<L>,
        notifier: Notifier,
        clock: Arc<C>,
    ) -> Self {
        Self {
            teams,
            tasks,
            ledger,
            notifier,
            clock,
        }
    }

    /// Transitions a task to a new status.
    ///
    /// Any member of the owning team may move any status to any other.
    /// The task author is notified unless the author made the change
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is
    /// absent, [`TaskLifecycleError::NotATeamMember`] when the actor does
    /// not belong to the task's team, or a repository error.
    pub async fn change_status(
        &self,
        task: TaskId,
        status: TaskStatus,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        let mut stored = self.load(task).await?;
        self.require_membership(stored.team(), actor).await?;

        stored.set_status(status, self.clock.as_ref());
        self.tasks.update(&stored).await?;
        tracing::info!(task = %stored.id(), %status, %actor, "task status changed");

        if actor != stored.author() {
            let view = StatusChangeView::from_task(&stored, actor);
            self.notifier
                .notify_status_change(stored.author(), &view)
                .await;
        }
        Ok(stored)
    }

    /// Applies a partial field edit to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is
    /// absent, [`TaskLifecycleError::NotATeamMember`] when the actor does
    /// not belong to the task's team, a domain error when an edited field
    /// fails validation, or a repository error.
    pub async fn edit_fields(
        &self,
        task: TaskId,
        edits: TaskFieldEdits,
        actor: UserId,
    ) -> TaskLifecycleResult<Task> {
        let mut stored = self.load(task).await?;
        self.require_membership(stored.team(), actor).await?;

        stored.apply_edits(edits, self.clock.as_ref())?;
        self.tasks.update(&stored).await?;
        Ok(stored)
    }

    /// Deletes a task, cascading its comments and dispatch records.
    ///
    /// Allowed for the task author and for members whose role carries the
    /// remove-any-task capability. The ledger cascade keeps a later task
    /// reusing the same deadline windows from being treated as already
    /// reminded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is
    /// absent, [`TaskLifecycleError::DeletionDenied`] when the actor is
    /// neither the author nor suitably privileged, or a repository/ledger
    /// error.
    pub async fn delete_task(&self, task: TaskId, actor: UserId) -> TaskLifecycleResult<()> {
        let stored = self.load(task).await?;
        let role = self.teams.member_role(stored.team(), actor).await?;
        let permitted = actor == stored.author()
            || role.is_some_and(|role| role.can_remove_any_task());
        if !permitted {
            return Err(TaskLifecycleError::DeletionDenied { task, actor });
        }

        self.tasks.delete(task).await?;
        self.ledger.remove_for_task(task).await?;
        tracing::info!(%task, %actor, "task deleted");
        Ok(())
    }

    /// Adds a comment to a task.
    ///
    /// The task author and assignee are each notified, excluding the
    /// commenter themselves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task is
    /// absent, [`TaskLifecycleError::NotATeamMember`] when the commenter
    /// does not belong to the task's team, a domain error for empty text,
    /// or a repository error.
    pub async fn add_comment(
        &self,
        task: TaskId,
        author: UserId,
        text: impl Into<String> + Send,
    ) -> TaskLifecycleResult<Comment> {
        let stored = self.load(task).await?;
        self.require_membership(stored.team(), author).await?;

        let comment = Comment::new(task, author, text, self.clock.as_ref())?;
        self.tasks.add_comment(&comment).await?;

        let view = CommentView {
            task_id: stored.id().to_string(),
            title: stored.title().to_owned(),
            commenter: author.to_string(),
            text: comment.text().to_owned(),
        };
        let mut recipients = vec![stored.author()];
        if let Some(assignee) = stored.assignee() {
            if assignee != stored.author() {
                recipients.push(assignee);
            }
        }
        for recipient in recipients {
            if recipient != author {
                self.notifier.notify_comment(recipient, &view).await;
            }
        }
        Ok(comment)
    }

    /// Lists a task's comments in creation order.
    ///
    /// # Errors
    ///
    /// Returns a repository error when storage fails.
    pub async fn comments(&self, task: TaskId) -> TaskLifecycleResult<Vec<Comment>> {
        Ok(self.tasks.comments(task).await?)
    }

    async fn load(&self, task: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task))
    }

    async fn require_membership(&self, team: TeamId, user: UserId) -> TaskLifecycleResult<()> {
        if self.teams.member_role(team, user).await?.is_none() {
            return Err(TaskLifecycleError::NotATeamMember { team, user });
        }
        Ok(())
    }
}
