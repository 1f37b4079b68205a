//! Error types for team domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing team domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The team name is empty after trimming or exceeds the length cap.
    #[error("team name must be between 1 and 100 characters")]
    InvalidTeamName,

    /// The invite code is empty or contains whitespace.
    #[error("invalid invite code: '{0}'")]
    InvalidInviteCode(String),
}

/// Error returned while parsing subscription tiers from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown subscription tier: {0}")]
pub struct ParseTierError(pub String);

/// Error returned while parsing membership roles from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown membership role: {0}")]
pub struct ParseRoleError(pub String);
