//! Domain model for tasks, drafts, and comments.
//!
//! The task domain models wizard-driven task creation, unrestricted status
//! transitions with a sticky completion timestamp, deadline parsing, and
//! task comments, keeping all infrastructure concerns outside the domain
//! boundary.

mod comment;
mod deadline;
mod draft;
mod error;
mod ids;
mod priority;
mod status;
mod task;

pub use comment::Comment;
pub use deadline::{parse_deadline, DeadlineParseError};
pub use draft::TaskDraft;
pub use error::{ParsePriorityError, ParseStatusError, TaskDomainError};
pub use ids::{CommentId, TaskId};
pub use priority::Priority;
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task, TaskFieldEdits};
