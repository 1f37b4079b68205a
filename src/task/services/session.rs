//! Session store for in-progress wizard drafts.
//!
//! The only core-owned mutable state with a lifetime shorter than a task.
//! Drafts are keyed by the initiating user; a session is single-user and
//! single-flow, so no per-entry locking is needed. An optional TTL bounds
//! abandoned drafts; an expired entry behaves exactly like an absent one.

use super::wizard::WizardState;
use crate::task::domain::TaskDraft;
use crate::team::domain::UserId;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors returned by the draft store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftStoreError {
    /// The store's lock was poisoned by a panicking writer.
    #[error("draft store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone)]
struct DraftEntry {
    draft: TaskDraft,
    state: WizardState,
    touched_at: DateTime<Utc>,
}

/// In-memory session store mapping users to wizard drafts.
#[derive(Debug)]
pub struct DraftStore {
    entries: RwLock<HashMap<UserId, DraftEntry>>,
    ttl: Option<Duration>,
}

impl DraftStore {
    /// Creates a store with the given draft time-to-live.
    ///
    /// `None` keeps drafts until completion or cancellation.
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Inserts a fresh draft for a user, replacing any existing one.
    ///
    /// Starting a second wizard while one is open is deliberate
    /// last-write-wins; returns `true` when a previous draft was replaced.
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError::Poisoned`] when the lock is poisoned.
    pub fn begin(
        &self,
        user: UserId,
        draft: TaskDraft,
        now: DateTime<Utc>,
    ) -> Result<bool, DraftStoreError> {
        let mut entries = self.entries.write().map_err(|_| DraftStoreError::Poisoned)?;
        let replaced = entries
            .insert(
                user,
                DraftEntry {
                    draft,
                    state: WizardState::AwaitingTitle,
                    touched_at: now,
                },
            )
            .is_some();
        Ok(replaced)
    }

    /// Fetches a user's draft and wizard state, expiring stale entries.
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError::Poisoned`] when the lock is poisoned.
    pub fn fetch(
        &self,
        user: UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<(TaskDraft, WizardState)>, DraftStoreError> {
        let mut entries = self.entries.write().map_err(|_| DraftStoreError::Poisoned)?;
        let expired = self.ttl.is_some_and(|ttl| {
            entries
                .get(&user)
                .is_some_and(|entry| now - entry.touched_at > ttl)
        });
        if expired {
            entries.remove(&user);
            tracing::debug!(%user, "discarded expired wizard draft");
            return Ok(None);
        }
        Ok(entries
            .get(&user)
            .map(|entry| (entry.draft.clone(), entry.state)))
    }

    /// Writes back a user's draft and state, refreshing the TTL.
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError::Poisoned`] when the lock is poisoned.
    pub fn put(
        &self,
        user: UserId,
        draft: TaskDraft,
        state: WizardState,
        now: DateTime<Utc>,
    ) -> Result<(), DraftStoreError> {
        let mut entries = self.entries.write().map_err(|_| DraftStoreError::Poisoned)?;
        entries.insert(
            user,
            DraftEntry {
                draft,
                state,
                touched_at: now,
            },
        );
        Ok(())
    }

    /// Discards a user's draft; returns `true` when one existed.
    ///
    /// # Errors
    ///
    /// Returns [`DraftStoreError::Poisoned`] when the lock is poisoned.
    pub fn remove(&self, user: UserId) -> Result<bool, DraftStoreError> {
        let mut entries = self.entries.write().map_err(|_| DraftStoreError::Poisoned)?;
        Ok(entries.remove(&user).is_some())
    }
}
