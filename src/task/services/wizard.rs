//! Guided task-creation wizard.
//!
//! A linear six-step flow collecting title, description, assignee,
//! deadline, and priority before a confirmation preview. Invalid input
//! re-prompts the same step without touching the draft; nothing is
//! persisted until the confirmation step commits in a single write.

use super::session::{DraftStore, DraftStoreError};
use crate::notify::ports::AssignmentView;
use crate::notify::services::Notifier;
use crate::task::domain::{
    parse_deadline, DeadlineParseError, NewTaskData, Priority, Task, TaskDomainError, TaskDraft,
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use crate::team::domain::{TeamId, UserId};
use crate::team::ports::{TaskCounter, TeamRepository, TeamRepositoryError};
use crate::team::services::{LimitDecision, LimitGuard, LimitGuardError};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

const MIN_WIZARD_TITLE_CHARS: usize = 2;
const MAX_WIZARD_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 1000;

/// The step the wizard is waiting on for a given user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardState {
    /// Waiting for the task title.
    AwaitingTitle,
    /// Waiting for the description, or a skip.
    AwaitingDescription,
    /// Waiting for an assignee choice, or a skip.
    AwaitingAssignee,
    /// Waiting for a deadline, or a skip.
    AwaitingDeadline,
    /// Waiting for a priority choice.
    AwaitingPriority,
    /// Waiting for the final confirm or reject.
    AwaitingConfirmation,
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AwaitingTitle => "awaiting-title",
            Self::AwaitingDescription => "awaiting-description",
            Self::AwaitingAssignee => "awaiting-assignee",
            Self::AwaitingDeadline => "awaiting-deadline",
            Self::AwaitingPriority => "awaiting-priority",
            Self::AwaitingConfirmation => "awaiting-confirmation",
        };
        f.write_str(label)
    }
}

/// One user input fed to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardInput {
    /// Free text, accepted by the title, description, and deadline steps.
    Text(String),
    /// Skip the current optional step.
    Skip,
    /// Assignee choice; `None` leaves the task unassigned.
    Assignee(Option<UserId>),
    /// Priority choice.
    Priority(Priority),
    /// Confirm the preview and commit the task.
    Confirm,
    /// Reject the preview and discard the draft.
    Reject,
}

/// Why a step rejected its input. The wizard stays on the same step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WizardInputError {
    /// The title is outside the accepted length range.
    #[error("title must be between {min} and {max} characters")]
    TitleLength {
        /// Minimum accepted length in characters.
        min: usize,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The description exceeds the accepted length.
    #[error("description must be at most {max} characters")]
    DescriptionTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The chosen assignee is not a member of the draft's team.
    #[error("user {0} is not a member of this team")]
    AssigneeNotMember(UserId),

    /// The deadline text did not parse or lies in the past.
    #[error(transparent)]
    Deadline(#[from] DeadlineParseError),

    /// The input kind does not fit the current step.
    #[error("input does not fit the {state} step")]
    UnexpectedInput {
        /// The step that rejected the input.
        state: WizardState,
    },
}

/// Outcome of feeding one input to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStep {
    /// The step was accepted; the wizard now waits on `state`.
    Prompt {
        /// The next step awaiting input.
        state: WizardState,
        /// Draft snapshot, for rendering prompts and the preview.
        draft: TaskDraft,
    },
    /// The step rejected its input; the wizard stays on `state`.
    Retry {
        /// The step still awaiting valid input.
        state: WizardState,
        /// Why the input was rejected.
        error: WizardInputError,
    },
    /// The confirmation step committed the task.
    Committed(Task),
    /// The confirmation step rejected the preview; the draft is gone.
    Aborted,
}

/// Errors returned by wizard operations.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The initiating user is not a member of the target team.
    #[error("user {user} is not a member of team {team}")]
    NotATeamMember {
        /// The target team.
        team: TeamId,
        /// The non-member user.
        user: UserId,
    },

    /// The team's tier does not allow another active task.
    #[error(
        "task limit reached: {current} of {limit} ({tier})",
        current = .0.current,
        limit = limit_display(.0),
        tier = .0.tier,
    )]
    LimitExceeded(LimitDecision),

    /// No draft exists for this user (never started, or expired).
    #[error("no active wizard for user {0}")]
    NoActiveWizard(UserId),

    /// The confirmation step found a draft with no title.
    #[error("draft is missing a title")]
    IncompleteDraft,

    /// Domain validation failed at commit.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Team repository failure.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),

    /// Limit guard failure.
    #[error(transparent)]
    Limits(#[from] LimitGuardError),

    /// Draft store failure.
    #[error(transparent)]
    Session(#[from] DraftStoreError),
}

fn limit_display(decision: &LimitDecision) -> String {
    decision
        .limit
        .map_or_else(|| "unlimited".to_owned(), |ceiling| ceiling.to_string())
}

/// Result type for wizard operations.
pub type WizardResult<T> = Result<T, WizardError>;

/// Task-creation wizard service.
pub struct TaskWizard<TR, TA, C>
where
    TR: TeamRepository,
    TA: TaskRepository + TaskCounter,
    C: Clock + Send + Sync,
{
    teams: Arc<TR>,
    tasks: Arc<TA>,
    limits: LimitGuard<TR, TA>,
    drafts: Arc<DraftStore>,
    notifier: Notifier,
    clock: Arc<C>,
}

impl<TR, TA, C> TaskWizard<TR, TA, C>
where
    TR: TeamRepository,
    TA: TaskRepository + TaskCounter,
    C: Clock + Send + Sync,
{
    /// Creates a wizard over the given repositories and draft store.
    #[must_use]
    pub fn new(
        teams: Arc<TR>,
        tasks: Arc<TA>,
        drafts: Arc<DraftStore>,
        notifier: Notifier,
        clock: Arc<C>,
    ) -> Self {
        let limits = LimitGuard::new(Arc::clone(&teams), Arc::clone(&tasks));
        Self {
            teams,
            tasks,
            limits,
            drafts,
            notifier,
            clock,
        }
    }

    /// Starts a wizard for a user in a team.
    ///
    /// Membership and the tier's task ceiling are checked up front so a
    /// user at the limit never walks the flow only to fail at commit.
    /// An existing draft for the same user is silently replaced.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NotATeamMember`] when the user does not
    /// belong to the team, [`WizardError::LimitExceeded`] when the tier's
    /// task ceiling is reached, or a repository/session error.
    pub async fn begin(&self, team: TeamId, user: UserId) -> WizardResult<WizardStep> {
        if self.teams.member_role(team, user).await?.is_none() {
            return Err(WizardError::NotATeamMember { team, user });
        }
        let decision = self.limits.can_create_task(team).await?;
        if !decision.allowed {
            return Err(WizardError::LimitExceeded(decision));
        }

        let draft = TaskDraft::new(team, user);
        let replaced = self.drafts.begin(user, draft.clone(), self.clock.utc())?;
        if replaced {
            tracing::debug!(%user, "replaced an in-progress wizard draft");
        }
        Ok(WizardStep::Prompt {
            state: WizardState::AwaitingTitle,
            draft,
        })
    }

    /// Feeds one input to the user's active wizard.
    ///
    /// Valid input advances to the next step; invalid input yields
    /// [`WizardStep::Retry`] and leaves the draft untouched.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoActiveWizard`] when the user has no live
    /// draft, or a domain/repository/session error at commit.
    pub async fn submit(&self, user: UserId, input: WizardInput) -> WizardResult<WizardStep> {
        let now = self.clock.utc();
        let (draft, state) = self
            .drafts
            .fetch(user, now)?
            .ok_or(WizardError::NoActiveWizard(user))?;

        match state {
            WizardState::AwaitingTitle => self.on_title(user, draft, input),
            WizardState::AwaitingDescription => self.on_description(user, draft, input),
            WizardState::AwaitingAssignee => self.on_assignee(user, draft, input).await,
            WizardState::AwaitingDeadline => self.on_deadline(user, draft, input),
            WizardState::AwaitingPriority => self.on_priority(user, draft, input),
            WizardState::AwaitingConfirmation => self.on_confirmation(user, draft, input).await,
        }
    }

    /// Cancels the user's active wizard and discards the draft.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::NoActiveWizard`] when no draft exists, or a
    /// session error.
    pub fn cancel(&self, user: UserId) -> WizardResult<()> {
        if self.drafts.remove(user)? {
            Ok(())
        } else {
            Err(WizardError::NoActiveWizard(user))
        }
    }

    fn on_title(
        &self,
        user: UserId,
        mut draft: TaskDraft,
        input: WizardInput,
    ) -> WizardResult<WizardStep> {
        let WizardInput::Text(text) = input else {
            return Ok(retry(WizardState::AwaitingTitle));
        };
        let title = text.trim();
        let title_chars = title.chars().count();
        if title_chars < MIN_WIZARD_TITLE_CHARS || title_chars > MAX_WIZARD_TITLE_CHARS {
            return Ok(WizardStep::Retry {
                state: WizardState::AwaitingTitle,
                error: WizardInputError::TitleLength {
                    min: MIN_WIZARD_TITLE_CHARS,
                    max: MAX_WIZARD_TITLE_CHARS,
                },
            });
        }
        draft.title = Some(title.to_owned());
        self.advance(user, draft, WizardState::AwaitingDescription)
    }

    fn on_description(
        &self,
        user: UserId,
        mut draft: TaskDraft,
        input: WizardInput,
    ) -> WizardResult<WizardStep> {
        match input {
            WizardInput::Text(text) => {
                if text.chars().count() > MAX_DESCRIPTION_CHARS {
                    return Ok(WizardStep::Retry {
                        state: WizardState::AwaitingDescription,
                        error: WizardInputError::DescriptionTooLong {
                            max: MAX_DESCRIPTION_CHARS,
                        },
                    });
                }
                draft.description = Some(text);
            }
            WizardInput::Skip => draft.description = None,
            _ => return Ok(retry(WizardState::AwaitingDescription)),
        }
        self.advance(user, draft, WizardState::AwaitingAssignee)
    }

    async fn on_assignee(
        &self,
        user: UserId,
        mut draft: TaskDraft,
        input: WizardInput,
    ) -> WizardResult<WizardStep> {
        match input {
            WizardInput::Assignee(Some(assignee)) => {
                if self
                    .teams
                    .member_role(draft.team, assignee)
                    .await?
                    .is_none()
                {
                    return Ok(WizardStep::Retry {
                        state: WizardState::AwaitingAssignee,
                        error: WizardInputError::AssigneeNotMember(assignee),
                    });
                }
                draft.assignee = Some(assignee);
            }
            WizardInput::Assignee(None) | WizardInput::Skip => draft.assignee = None,
            _ => return Ok(retry(WizardState::AwaitingAssignee)),
        }
        self.advance(user, draft, WizardState::AwaitingDeadline)
    }

    fn on_deadline(
        &self,
        user: UserId,
        mut draft: TaskDraft,
        input: WizardInput,
    ) -> WizardResult<WizardStep> {
        match input {
            WizardInput::Text(text) => match parse_deadline(&text, self.clock.utc()) {
                Ok(deadline) => draft.deadline = Some(deadline),
                Err(error) => {
                    return Ok(WizardStep::Retry {
                        state: WizardState::AwaitingDeadline,
                        error: WizardInputError::Deadline(error),
                    });
                }
            },
            WizardInput::Skip => draft.deadline = None,
            _ => return Ok(retry(WizardState::AwaitingDeadline)),
        }
        self.advance(user, draft, WizardState::AwaitingPriority)
    }

    fn on_priority(
        &self,
        user: UserId,
        mut draft: TaskDraft,
        input: WizardInput,
    ) -> WizardResult<WizardStep> {
        match input {
            WizardInput::Priority(priority) => draft.priority = Some(priority),
            WizardInput::Skip => draft.priority = Some(Priority::default()),
            _ => return Ok(retry(WizardState::AwaitingPriority)),
        }
        self.advance(user, draft, WizardState::AwaitingConfirmation)
    }

    async fn on_confirmation(
        &self,
        user: UserId,
        draft: TaskDraft,
        input: WizardInput,
    ) -> WizardResult<WizardStep> {
        match input {
            WizardInput::Confirm => self.commit(user, draft).await,
            WizardInput::Reject => {
                self.drafts.remove(user)?;
                Ok(WizardStep::Aborted)
            }
            _ => Ok(retry(WizardState::AwaitingConfirmation)),
        }
    }

    /// Commits a confirmed draft: one durable write, then a best-effort
    /// assignment notification when someone other than the author was
    /// assigned. The draft is discarded only after the write succeeds.
    async fn commit(&self, user: UserId, draft: TaskDraft) -> WizardResult<WizardStep> {
        let title = draft.title.ok_or(WizardError::IncompleteDraft)?;
        let task = Task::new(
            NewTaskData {
                team: draft.team,
                title,
                description: draft.description,
                assignee: draft.assignee,
                author: draft.author,
                deadline: draft.deadline,
                priority: draft.priority.unwrap_or_default(),
            },
            self.clock.as_ref(),
        )?;
        self.tasks.store(&task).await?;
        self.drafts.remove(user)?;
        tracing::info!(task = %task.id(), team = %task.team(), "task created");

        if let Some(assignee) = task.assignee() {
            if assignee != task.author() {
                let view = AssignmentView::from_task(&task, task.author().to_string());
                self.notifier.notify_assignment(assignee, &view).await;
            }
        }
        Ok(WizardStep::Committed(task))
    }

    fn advance(
        &self,
        user: UserId,
        draft: TaskDraft,
        next: WizardState,
    ) -> WizardResult<WizardStep> {
        self.drafts
            .put(user, draft.clone(), next, self.clock.utc())?;
        Ok(WizardStep::Prompt { state: next, draft })
    }
}

const fn retry(state: WizardState) -> WizardStep {
    WizardStep::Retry {
        state,
        error: WizardInputError::UnexpectedInput { state },
    }
}
