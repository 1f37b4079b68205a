//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is outside the 1–200 character range.
    #[error("task title must be between 1 and 200 characters")]
    InvalidTitle,

    /// The description exceeds 1000 characters.
    #[error("task description must not exceed 1000 characters")]
    DescriptionTooLong,

    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyComment,
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
