//! Shared wiring for the in-memory integration suite.

#![expect(
    clippy::expect_used,
    reason = "the built-in templates are static and load infallibly"
)]

use std::sync::Arc;

use taskherd::config::WizardConfig;
use taskherd::notify::adapters::{RecordingTransport, TemplateRenderer};
use taskherd::notify::services::Notifier;
use taskherd::reminder::adapters::InMemoryDispatchLedger;
use taskherd::reminder::services::ReminderScheduler;
use taskherd::task::adapters::memory::InMemoryTaskRepository;
use taskherd::task::domain::{Priority, Task};
use taskherd::task::services::{DraftStore, TaskLifecycleService, TaskWizard, WizardInput, WizardStep};
use taskherd::team::adapters::memory::InMemoryTeamRepository;
use taskherd::team::domain::{InviteCode, Team, TeamId, UserId};
use taskherd::team::services::{LimitGuard, TeamService};
use taskherd::testing::FixedClock;

pub type TestWizard = TaskWizard<InMemoryTeamRepository, InMemoryTaskRepository, FixedClock>;
pub type TestLifecycle = TaskLifecycleService<
    InMemoryTeamRepository,
    InMemoryTaskRepository,
    InMemoryDispatchLedger,
    FixedClock,
>;
pub type TestTeamService =
    TeamService<InMemoryTeamRepository, InMemoryTaskRepository, FixedClock>;
pub type TestScheduler = ReminderScheduler<
    InMemoryTeamRepository,
    InMemoryTaskRepository,
    InMemoryDispatchLedger,
    FixedClock,
>;

/// Fully wired in-memory deployment of the core.
pub struct TestEnvironment {
    pub teams: Arc<InMemoryTeamRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub ledger: Arc<InMemoryDispatchLedger>,
    pub transport: RecordingTransport,
    pub clock: Arc<FixedClock>,
    pub team_service: TestTeamService,
    pub wizard: TestWizard,
    pub lifecycle: TestLifecycle,
    pub scheduler: TestScheduler,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let teams = Arc::new(InMemoryTeamRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let ledger = Arc::new(InMemoryDispatchLedger::new());
        let transport = RecordingTransport::new();
        let renderer = TemplateRenderer::new().expect("built-in templates should load");
        let notifier = Notifier::new(Arc::new(transport.clone()), Arc::new(renderer));
        let clock = Arc::new(FixedClock::at(2024, 3, 1, 9, 0));
        let drafts = Arc::new(DraftStore::new(WizardConfig::default().draft_ttl()));

        let guard = LimitGuard::new(Arc::clone(&teams), Arc::clone(&tasks));
        let team_service =
            TeamService::new(Arc::clone(&teams), guard, Arc::clone(&clock));
        let wizard = TaskWizard::new(
            Arc::clone(&teams),
            Arc::clone(&tasks),
            drafts,
            notifier.clone(),
            Arc::clone(&clock),
        );
        let lifecycle = TaskLifecycleService::new(
            Arc::clone(&teams),
            Arc::clone(&tasks),
            Arc::clone(&ledger),
            notifier.clone(),
            Arc::clone(&clock),
        );
        let scheduler = ReminderScheduler::new(
            Arc::clone(&teams),
            Arc::clone(&tasks),
            Arc::clone(&ledger),
            notifier,
            Arc::clone(&clock),
        );

        Self {
            teams,
            tasks,
            ledger,
            transport,
            clock,
            team_service,
            wizard,
            lifecycle,
            scheduler,
        }
    }

    /// Creates a team owned by `owner` and joins the given members.
    pub async fn team_with_members(
        &self,
        name: &str,
        code: &str,
        owner: UserId,
        members: &[UserId],
    ) -> eyre::Result<Team> {
        let team = self
            .team_service
            .create_team(name, owner, InviteCode::new(code)?)
            .await?;
        for member in members {
            self.team_service
                .join_via_invite(team.invite_code(), *member)
                .await?;
        }
        Ok(team)
    }

    /// Drives the wizard end to end and returns the committed task.
    pub async fn create_task(
        &self,
        team: TeamId,
        author: UserId,
        title: &str,
        assignee: Option<UserId>,
        deadline_text: Option<&str>,
    ) -> eyre::Result<Task> {
        self.wizard.begin(team, author).await?;
        self.step(author, WizardInput::Text(title.to_owned())).await?;
        self.step(author, WizardInput::Skip).await?;
        self.step(author, WizardInput::Assignee(assignee)).await?;
        match deadline_text {
            Some(text) => self.step(author, WizardInput::Text(text.to_owned())).await?,
            None => self.step(author, WizardInput::Skip).await?,
        }
        self.step(author, WizardInput::Priority(Priority::default())).await?;

        let step = self.wizard.submit(author, WizardInput::Confirm).await?;
        match step {
            WizardStep::Committed(task) => Ok(task),
            other => Err(eyre::eyre!("wizard did not commit: {other:?}")),
        }
    }

    async fn step(&self, user: UserId, input: WizardInput) -> eyre::Result<()> {
        let step = self.wizard.submit(user, input).await?;
        match step {
            WizardStep::Prompt { .. } => Ok(()),
            other => Err(eyre::eyre!("wizard step rejected: {other:?}")),
        }
    }
}
