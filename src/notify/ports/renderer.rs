//! Notification rendering port and its view models.
//!
//! Rendering is a pure function of a view snapshot into display text; the
//! views carry display-ready strings so renderers stay free of domain
//! imports.

use crate::task::domain::{Priority, Task, TaskStatus};
use crate::team::domain::UserId;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by notification renderers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Template expansion failed.
    #[error("template render failed: {0}")]
    Template(String),
}

const DEADLINE_DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// View for an assignment notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentView {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Task priority.
    pub priority: Priority,
    /// Display name or id of the authoring user.
    pub author: String,
    /// Formatted deadline, when set.
    pub deadline: Option<String>,
}

impl AssignmentView {
    /// Builds the view from a task snapshot and an author display name.
    #[must_use]
    pub fn from_task(task: &Task, author: impl Into<String>) -> Self {
        Self {
            task_id: task.id().to_string(),
            title: task.title().to_owned(),
            priority: task.priority(),
            author: author.into(),
            deadline: task
                .deadline()
                .map(|deadline| deadline.format(DEADLINE_DISPLAY_FORMAT).to_string()),
        }
    }
}

/// View for a status-change notification sent to the task author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChangeView {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// The status after the transition.
    pub status: TaskStatus,
    /// Display name or id of the user who changed the status.
    pub changed_by: String,
}

impl StatusChangeView {
    /// Builds the view from a task snapshot and the acting user.
    #[must_use]
    pub fn from_task(task: &Task, changed_by: UserId) -> Self {
        Self {
            task_id: task.id().to_string(),
            title: task.title().to_owned(),
            status: task.status(),
            changed_by: changed_by.to_string(),
        }
    }
}

/// View for a new-comment notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Display name or id of the commenter.
    pub commenter: String,
    /// Comment text, truncated upstream if needed.
    pub text: String,
}

/// View for a deadline reminder.
///
/// The headline and framing strings carry the window-specific urgency and
/// are chosen by the scheduler from the matched window kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderView {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Formatted deadline.
    pub deadline: String,
    /// Urgency headline, e.g. "Reminder" or "Deadline now".
    pub headline: String,
    /// Urgency framing, e.g. "due tomorrow".
    pub framing: String,
}

impl ReminderView {
    /// Builds the view from a task snapshot and urgency strings.
    #[must_use]
    pub fn from_task(task: &Task, headline: impl Into<String>, framing: impl Into<String>) -> Self {
        Self {
            task_id: task.id().to_string(),
            title: task.title().to_owned(),
            deadline: task
                .deadline()
                .map(|deadline| deadline.format(DEADLINE_DISPLAY_FORMAT).to_string())
                .unwrap_or_default(),
            headline: headline.into(),
            framing: framing.into(),
        }
    }
}

/// One task line within a digest section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestTaskLine {
    /// Task identifier.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Task priority.
    pub priority: Priority,
    /// Formatted due time for today's tasks, when set.
    pub due_time: Option<String>,
}

impl DigestTaskLine {
    /// Builds a digest line from a task snapshot.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.id().to_string(),
            title: task.title().to_owned(),
            priority: task.priority(),
            due_time: task
                .deadline()
                .map(|deadline| deadline.format("%H:%M").to_string()),
        }
    }
}

/// Per-team section of a user's daily digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestTeamSection {
    /// Team display name.
    pub team_name: String,
    /// Today's tasks assigned to the digest recipient in this team.
    pub tasks: Vec<DigestTaskLine>,
}

/// A user's daily digest: today's obligations plus overdue work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DigestView {
    /// Sections for teams with tasks due today.
    pub sections: Vec<DigestTeamSection>,
    /// Overdue tasks assigned to the recipient, capped upstream.
    pub overdue: Vec<DigestTaskLine>,
}

impl DigestView {
    /// Whether the digest carries nothing worth sending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.overdue.is_empty()
    }
}

/// View for a limit-exceeded refusal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitView {
    /// Current count of the limited resource.
    pub current: u32,
    /// Display form of the ceiling.
    pub limit: String,
    /// Tier name.
    pub tier: String,
}

/// Pure rendering of typed views into chat display text.
pub trait NotificationRenderer: Send + Sync {
    /// Renders an assignment notification.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when template expansion fails.
    fn render_assignment(&self, view: &AssignmentView) -> Result<String, RenderError>;

    /// Renders a status-change notification.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when template expansion fails.
    fn render_status_change(&self, view: &StatusChangeView) -> Result<String, RenderError>;

    /// Renders a new-comment notification.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when template expansion fails.
    fn render_comment(&self, view: &CommentView) -> Result<String, RenderError>;

    /// Renders a deadline reminder.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when template expansion fails.
    fn render_reminder(&self, view: &ReminderView) -> Result<String, RenderError>;

    /// Renders a daily digest.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when template expansion fails.
    fn render_digest(&self, view: &DigestView) -> Result<String, RenderError>;

    /// Renders a limit-exceeded refusal.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when template expansion fails.
    fn render_limit_exceeded(&self, view: &LimitView) -> Result<String, RenderError>;
}
