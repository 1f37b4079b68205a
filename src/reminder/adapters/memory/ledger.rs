//! Thread-safe in-memory implementation of [`DispatchLedger`].

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::reminder::{
    domain::WindowKind,
    ports::{DispatchLedger, DispatchLedgerError, DispatchLedgerResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory dispatch ledger.
///
/// `record` inserts under a single write lock, matching the atomic
/// claim-or-skip contract of the port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDispatchLedger {
    records: Arc<RwLock<HashSet<(TaskId, WindowKind)>>>,
}

impl InMemoryDispatchLedger {
    /// Creates an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> DispatchLedgerError {
    DispatchLedgerError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl DispatchLedger for InMemoryDispatchLedger {
    async fn record(&self, task: TaskId, window: WindowKind) -> DispatchLedgerResult<bool> {
        let mut records = self.records.write().map_err(lock_poisoned)?;
        Ok(records.insert((task, window)))
    }

    async fn is_recorded(&self, task: TaskId, window: WindowKind) -> DispatchLedgerResult<bool> {
        let records = self.records.read().map_err(lock_poisoned)?;
        Ok(records.contains(&(task, window)))
    }

    async fn remove_for_task(&self, task: TaskId) -> DispatchLedgerResult<()> {
        let mut records = self.records.write().map_err(lock_poisoned)?;
        records.retain(|(recorded_task, _)| *recorded_task != task);
        Ok(())
    }
}
