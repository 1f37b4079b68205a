//! Dispatch ledger port.
//!
//! The ledger is the reminder sweep's idempotency mechanism: one insert-only
//! record per (task, window kind) pair, never updated, consulted and
//! written through a single atomic claim so concurrent or repeated sweeps
//! cannot double-notify.

use crate::reminder::domain::WindowKind;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dispatch ledger operations.
pub type DispatchLedgerResult<T> = Result<T, DispatchLedgerError>;

/// Idempotency ledger for reminder dispatches.
#[async_trait]
pub trait DispatchLedger: Send + Sync {
    /// Atomically claims the (task, window) slot.
    ///
    /// Returns `true` when this call inserted the record and the caller
    /// owns the dispatch; `false` when the record already existed. Backing
    /// stores implement this as a unique-constraint insert that ignores
    /// conflicts, never as a separate check followed by a write.
    async fn record(&self, task: TaskId, window: WindowKind) -> DispatchLedgerResult<bool>;

    /// Whether the (task, window) slot has been claimed.
    async fn is_recorded(&self, task: TaskId, window: WindowKind) -> DispatchLedgerResult<bool>;

    /// Removes all records for a task. Called when the task is deleted.
    async fn remove_for_task(&self, task: TaskId) -> DispatchLedgerResult<()>;
}

/// Errors returned by dispatch ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum DispatchLedgerError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DispatchLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
