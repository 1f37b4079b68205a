//! Deadline sweep and daily digest.
//!
//! The sweep is stateless between runs: it recomputes the three windows
//! from the current instant, claims a ledger slot per (task, window)
//! before any delivery attempt, and treats a failed delivery as spent.
//! Re-running a sweep therefore never re-notifies. The digest is built
//! all-or-nothing per recipient; a failure for one user never blocks the
//! rest.

use crate::notify::ports::{DigestTaskLine, DigestTeamSection, DigestView, ReminderView};
use crate::notify::services::Notifier;
use crate::reminder::domain::WindowKind;
use crate::reminder::ports::DispatchLedger;
use crate::task::domain::Task;
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::team::domain::{TeamId, UserId};
use crate::team::ports::{TeamRepository, TeamRepositoryError};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Overdue lines shown per digest before truncation.
const MAX_OVERDUE_LINES: usize = 5;

/// Errors that abort a whole scheduler run.
///
/// Per-item failures (one ledger write, one delivery, one recipient) are
/// logged and counted instead; only storage reads the run cannot proceed
/// without surface here.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Task store read failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Team store read failure.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),
}

/// Result type for scheduler runs.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Counters summarising one deadline sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Tasks whose deadline fell inside a window.
    pub matched: u32,
    /// Reminders handed to the transport successfully.
    pub delivered: u32,
    /// Matches skipped because the (task, window) pair was already
    /// recorded.
    pub skipped_recorded: u32,
    /// Matches skipped because the task has no assignee.
    pub skipped_unassigned: u32,
    /// Matches where the ledger write or the delivery failed.
    pub failed: u32,
}

/// Counters summarising one digest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestOutcome {
    /// Users considered (every user with at least one membership).
    pub recipients: u32,
    /// Digests handed to the transport successfully.
    pub delivered: u32,
    /// Users skipped because their digest was empty.
    pub skipped_empty: u32,
    /// Users whose digest build or delivery failed.
    pub failed: u32,
}

/// Deadline reminder and digest scheduler.
pub struct ReminderScheduler<TR, TA, L, C>
where
    TR: TeamRepository,
    TA: TaskRepository,
    L: DispatchLedger,
    C: Clock + Send + Sync,
{
    teams: Arc<TR>,
    tasks: Arc<TA>,
    ledger: Arc<L>,
    notifier: Notifier,
    clock: Arc<C>,
}

impl<TR, TA, L, C> ReminderScheduler<TR, TA, L, C>
where
    TR: TeamRepository,
    TA: TaskRepository,
    L: DispatchLedger,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler over the given stores.
    #[must_use]
    pub const fn new(
        teams: Arc<TR>,
        tasks: Arc<TA>,
        ledger: Arc<L>,
        notifier: Notifier,
        clock: Arc<C>,
    ) -> Self {
        Self {
            teams,
            tasks,
            ledger,
            notifier,
            clock,
        }
    }

    /// Runs one deadline sweep at the clock's current instant.
    ///
    /// For each window kind the task store is queried for non-terminal
    /// tasks due inside the window; each match claims its ledger slot
    /// before the reminder is rendered and sent. A delivery failure does
    /// not release the slot.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Tasks`] when a window query fails; the
    /// sweep aborts so the next run retries the same windows.
    pub async fn run_sweep(&self) -> SchedulerResult<SweepOutcome> {
        let now = self.clock.utc();
        let mut outcome = SweepOutcome::default();

        for kind in WindowKind::ALL {
            let (start, end) = kind.bounds(now);
            let due = self.tasks.find_in_deadline_window(start, end).await?;

            for task in due {
                outcome.matched += 1;
                let Some(assignee) = task.assignee() else {
                    outcome.skipped_unassigned += 1;
                    continue;
                };

                match self.ledger.record(task.id(), kind).await {
                    Ok(true) => {}
                    Ok(false) => {
                        outcome.skipped_recorded += 1;
                        continue;
                    }
                    Err(error) => {
                        tracing::warn!(
                            task = %task.id(),
                            window = %kind,
                            %error,
                            "dispatch ledger write failed",
                        );
                        outcome.failed += 1;
                        continue;
                    }
                }

                let view = ReminderView::from_task(&task, kind.headline(), kind.framing());
                if self.notifier.notify_reminder(assignee, &view).await.is_delivered() {
                    outcome.delivered += 1;
                } else {
                    outcome.failed += 1;
                }
            }
        }

        tracing::info!(
            matched = outcome.matched,
            delivered = outcome.delivered,
            skipped_recorded = outcome.skipped_recorded,
            skipped_unassigned = outcome.skipped_unassigned,
            failed = outcome.failed,
            "deadline sweep finished",
        );
        Ok(outcome)
    }

    /// Runs one daily digest at the clock's current instant.
    ///
    /// Every user holding at least one membership gets a digest of today's
    /// tasks assigned to them, grouped per team, plus up to five overdue
    /// tasks. Empty digests are not sent.
    ///
    /// # Errors
    ///
    /// Returns a [`SchedulerError`] when the membership listing or the
    /// overdue query fails; per-recipient failures are counted instead.
    pub async fn run_digest(&self) -> SchedulerResult<DigestOutcome> {
        let now = self.clock.utc();
        let today = now.date_naive();
        let mut outcome = DigestOutcome::default();

        let mut teams_by_user: BTreeMap<UserId, Vec<(TeamId, String)>> = BTreeMap::new();
        for listing in self.teams.memberships().await? {
            teams_by_user
                .entry(listing.user)
                .or_default()
                .push((listing.team, listing.team_name));
        }
        let overdue = self.tasks.find_overdue(now).await?;

        for (user, teams) in teams_by_user {
            outcome.recipients += 1;
            let view = match self.build_digest(user, &teams, &overdue, today).await {
                Ok(view) => view,
                Err(error) => {
                    tracing::warn!(%user, %error, "digest build failed");
                    outcome.failed += 1;
                    continue;
                }
            };
            if view.is_empty() {
                outcome.skipped_empty += 1;
                continue;
            }
            if self.notifier.notify_digest(user, &view).await.is_delivered() {
                outcome.delivered += 1;
            } else {
                outcome.failed += 1;
            }
        }

        tracing::info!(
            recipients = outcome.recipients,
            delivered = outcome.delivered,
            skipped_empty = outcome.skipped_empty,
            failed = outcome.failed,
            "daily digest finished",
        );
        Ok(outcome)
    }

    async fn build_digest(
        &self,
        user: UserId,
        teams: &[(TeamId, String)],
        overdue: &[Task],
        today: chrono::NaiveDate,
    ) -> SchedulerResult<DigestView> {
        let mut view = DigestView::default();
        for (team, team_name) in teams {
            let lines: Vec<DigestTaskLine> = self
                .tasks
                .find_due_on(*team, today)
                .await?
                .iter()
                .filter(|task| task.assignee() == Some(user))
                .map(DigestTaskLine::from_task)
                .collect();
            if !lines.is_empty() {
                view.sections.push(DigestTeamSection {
                    team_name: team_name.clone(),
                    tasks: lines,
                });
            }
        }

        let member_of: Vec<TeamId> = teams.iter().map(|(team, _)| *team).collect();
        view.overdue = overdue
            .iter()
            .filter(|task| task.assignee() == Some(user) && member_of.contains(&task.team()))
            .take(MAX_OVERDUE_LINES)
            .map(DigestTaskLine::from_task)
            .collect();
        Ok(view)
    }
}
