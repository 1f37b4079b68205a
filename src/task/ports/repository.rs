//! Repository port for task and comment persistence.

use crate::task::domain::{Comment, Task, TaskId};
use crate::team::domain::{TeamId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Each operation is individually atomic; the core never assumes
/// cross-operation transactions.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (status, fields, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes a task and cascades its comments.
    ///
    /// Dispatch-record cascade is owned by the reminder ledger and handled
    /// by the lifecycle service.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Lists all tasks of a team.
    async fn find_by_team(&self, team: TeamId) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists a team's tasks assigned to the given user.
    async fn find_by_assignee(
        &self,
        team: TeamId,
        assignee: UserId,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists non-terminal tasks across all teams whose deadline falls
    /// within `[start, end]` inclusive.
    async fn find_in_deadline_window(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists a team's non-terminal tasks whose deadline falls on the given
    /// calendar day.
    async fn find_due_on(&self, team: TeamId, day: NaiveDate) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists non-terminal tasks across all teams whose deadline lies
    /// strictly before `now`.
    async fn find_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a comment on an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()>;

    /// Lists a task's comments in creation order.
    async fn comments(&self, task: TaskId) -> TaskRepositoryResult<Vec<Comment>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
