//! Task aggregate root.

use super::{Priority, TaskDomainError, TaskId, TaskStatus};
use crate::team::domain::{TeamId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MIN_TITLE_CHARS: usize = 1;
const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Task aggregate root.
///
/// Created only by the wizard's confirmation step, mutated by status
/// transitions and field edits, and removed only by an explicit delete.
/// The completion timestamp is sticky: once a task has reached `done` it
/// keeps its `completed_at` even if the status later regresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    team: TeamId,
    title: String,
    description: Option<String>,
    assignee: Option<UserId>,
    author: UserId,
    deadline: Option<DateTime<Utc>>,
    priority: Priority,
    status: TaskStatus,
    tags: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning team.
    pub team: TeamId,
    /// Task title (1–200 characters).
    pub title: String,
    /// Optional description (at most 1000 characters).
    pub description: Option<String>,
    /// Optional assignee; must be a member of the owning team.
    pub assignee: Option<UserId>,
    /// Authoring user.
    pub author: UserId,
    /// Optional absolute deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Priority; defaults to medium upstream.
    pub priority: Priority,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning team.
    pub team: TeamId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted assignee, if any.
    pub assignee: Option<UserId>,
    /// Persisted author.
    pub author: UserId,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted free-text tags, if any.
    pub tags: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted completion timestamp, if the task ever reached done.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Partial field update applied by [`Task::apply_edits`].
///
/// `None` fields are left untouched; `Some` fields are written, including
/// `Some(None)` to clear an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFieldEdits {
    /// New title, if changed.
    pub title: Option<String>,
    /// New description, if changed (`Some(None)` clears).
    pub description: Option<Option<String>>,
    /// New assignee, if changed (`Some(None)` unassigns).
    pub assignee: Option<Option<UserId>>,
    /// New deadline, if changed (`Some(None)` clears).
    pub deadline: Option<Option<DateTime<Utc>>>,
    /// New priority, if changed.
    pub priority: Option<Priority>,
    /// New tags, if changed (`Some(None)` clears).
    pub tags: Option<Option<String>>,
}

impl Task {
    /// Creates a new task in `todo` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitle`] or
    /// [`TaskDomainError::DescriptionTooLong`] when field validation fails.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = data.title.trim().to_owned();
        let title_chars = title.chars().count();
        if title_chars < MIN_TITLE_CHARS || title_chars > MAX_TITLE_CHARS {
            return Err(TaskDomainError::InvalidTitle);
        }
        if let Some(description) = &data.description {
            if description.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(TaskDomainError::DescriptionTooLong);
            }
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            team: data.team,
            title,
            description: data.description,
            assignee: data.assignee,
            author: data.author,
            deadline: data.deadline,
            priority: data.priority,
            status: TaskStatus::Todo,
            tags: None,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            team: data.team,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
            author: data.author,
            deadline: data.deadline,
            priority: data.priority,
            status: data.status,
            tags: data.tags,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning team.
    #[must_use]
    pub const fn team(&self) -> TeamId {
        self.team
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the authoring user.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the free-text tags, if any.
    #[must_use]
    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp.
    ///
    /// Non-`None` iff the task has ever reached `done`; never cleared on
    /// status regression.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Applies a status transition.
    ///
    /// Any status is reachable from any other. Entering `done` stamps
    /// `completed_at` with the current instant if not already set; the
    /// stamp is preserved across later transitions, including a second
    /// visit to `done`. Every transition stamps `updated_at`.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        let timestamp = clock.utc();
        self.updated_at = timestamp;
        if status == TaskStatus::Done && self.completed_at.is_none() {
            self.completed_at = Some(timestamp);
        }
    }

    /// Applies a partial field edit, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitle`] or
    /// [`TaskDomainError::DescriptionTooLong`] when an edited field fails
    /// validation; on error no field is changed.
    pub fn apply_edits(
        &mut self,
        edits: TaskFieldEdits,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(title) = &edits.title {
            let title_chars = title.trim().chars().count();
            if title_chars < MIN_TITLE_CHARS || title_chars > MAX_TITLE_CHARS {
                return Err(TaskDomainError::InvalidTitle);
            }
        }
        if let Some(Some(description)) = &edits.description {
            if description.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(TaskDomainError::DescriptionTooLong);
            }
        }

        if let Some(title) = edits.title {
            self.title = title.trim().to_owned();
        }
        if let Some(description) = edits.description {
            self.description = description;
        }
        if let Some(assignee) = edits.assignee {
            self.assignee = assignee;
        }
        if let Some(deadline) = edits.deadline {
            self.deadline = deadline;
        }
        if let Some(priority) = edits.priority {
            self.priority = priority;
        }
        if let Some(tags) = edits.tags {
            self.tags = tags;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}
