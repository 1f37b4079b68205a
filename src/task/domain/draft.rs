//! Wizard-scoped task draft.

use super::Priority;
use crate::team::domain::{TeamId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The in-progress, not-yet-persisted task assembled by the creation
/// wizard.
///
/// Fields fill in step order; the draft is discarded on commit, rejection,
/// cancellation, or expiry. Only the team and author are known at the
/// start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Team the task will belong to.
    pub team: TeamId,
    /// User driving the wizard; becomes the task author.
    pub author: UserId,
    /// Title collected by the first step.
    pub title: Option<String>,
    /// Description, `None` until the step runs or when skipped.
    pub description: Option<String>,
    /// Chosen assignee, if any.
    pub assignee: Option<UserId>,
    /// Parsed deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Chosen priority.
    pub priority: Option<Priority>,
}

impl TaskDraft {
    /// Creates an empty draft for the given team and author.
    #[must_use]
    pub const fn new(team: TeamId, author: UserId) -> Self {
        Self {
            team,
            author,
            title: None,
            description: None,
            assignee: None,
            deadline: None,
            priority: None,
        }
    }
}
