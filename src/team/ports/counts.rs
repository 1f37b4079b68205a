//! Count port consumed by the limit guard.
//!
//! Task storage lives in the task module; the limit guard only needs the
//! active task count per team, so it depends on this narrow contract
//! instead of the full task repository.

use crate::team::domain::TeamId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Provider of per-team active task counts.
#[async_trait]
pub trait TaskCounter: Send + Sync {
    /// Counts tasks in non-terminal status (todo or in progress) for a team.
    async fn active_task_count(&self, team: TeamId) -> Result<u32, TaskCountError>;
}

/// Errors returned by task count providers.
#[derive(Debug, Clone, Error)]
pub enum TaskCountError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskCountError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
