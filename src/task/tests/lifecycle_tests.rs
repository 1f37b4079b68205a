//! Lifecycle service tests: status changes, edits, comments, deletion.

use std::sync::Arc;

use crate::notify::adapters::{RecordingTransport, TemplateRenderer};
use crate::notify::services::Notifier;
use crate::reminder::adapters::InMemoryDispatchLedger;
use crate::reminder::domain::WindowKind;
use crate::reminder::ports::DispatchLedger;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTaskData, Priority, Task, TaskFieldEdits, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use crate::team::{
    adapters::memory::InMemoryTeamRepository,
    domain::{InviteCode, Membership, Role, Team, TeamId, UserId},
    ports::TeamRepository,
};
use crate::testing::FixedClock;
use eyre::{bail, ensure};
use rstest::{fixture, rstest};

const AUTHOR: UserId = UserId::new(1);
const ASSIGNEE: UserId = UserId::new(2);
const ADMIN: UserId = UserId::new(3);
const OUTSIDER: UserId = UserId::new(9);

type TestService = TaskLifecycleService<
    InMemoryTeamRepository,
    InMemoryTaskRepository,
    InMemoryDispatchLedger,
    FixedClock,
>;

struct Harness {
    teams: Arc<InMemoryTeamRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    ledger: Arc<InMemoryDispatchLedger>,
    transport: RecordingTransport,
    clock: Arc<FixedClock>,
    service: TestService,
}

#[fixture]
fn harness() -> Harness {
    let teams = Arc::new(InMemoryTeamRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let ledger = Arc::new(InMemoryDispatchLedger::new());
    let transport = RecordingTransport::new();
    let renderer = TemplateRenderer::new().expect("built-in templates should load");
    let notifier = Notifier::new(Arc::new(transport.clone()), Arc::new(renderer));
    let clock = Arc::new(FixedClock::at(2024, 3, 1, 9, 0));
    let service = TaskLifecycleService::new(
        Arc::clone(&teams),
        Arc::clone(&tasks),
        Arc::clone(&ledger),
        notifier,
        Arc::clone(&clock),
    );
    Harness {
        teams,
        tasks,
        ledger,
        transport,
        clock,
        service,
    }
}

async fn seed_team(harness: &Harness) -> eyre::Result<TeamId> {
    let team = Team::new(
        "Alpha",
        AUTHOR,
        InviteCode::new("alpha-1")?,
        harness.clock.as_ref(),
    )?;
    harness.teams.store(&team).await?;
    for (user, role) in [(ASSIGNEE, Role::Member), (ADMIN, Role::Admin)] {
        harness
            .teams
            .add_member(Membership {
                team: team.id(),
                user,
                role,
            })
            .await?;
    }
    Ok(team.id())
}

async fn seed_task(harness: &Harness, team: TeamId) -> eyre::Result<Task> {
    let task = Task::new(
        NewTaskData {
            team,
            title: "Ship the beta".to_owned(),
            description: None,
            assignee: Some(ASSIGNEE),
            author: AUTHOR,
            deadline: None,
            priority: Priority::default(),
        },
        harness.clock.as_ref(),
    )?;
    harness.tasks.store(&task).await?;
    Ok(task)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_change_persists_and_notifies_the_author(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;

    let updated = harness
        .service
        .change_status(task.id(), TaskStatus::InProgress, ASSIGNEE)
        .await?;

    ensure!(updated.status() == TaskStatus::InProgress);
    let stored = harness.tasks.find_by_id(task.id()).await?;
    ensure!(stored.map(|task| task.status()) == Some(TaskStatus::InProgress));

    let notifications = harness.transport.deliveries_to(AUTHOR);
    ensure!(notifications.len() == 1);
    ensure!(notifications
        .first()
        .is_some_and(|text| text.contains("in_progress")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn author_changing_status_is_not_notified(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;

    harness
        .service
        .change_status(task.id(), TaskStatus::Done, AUTHOR)
        .await?;

    ensure!(harness.transport.deliveries().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_member_cannot_change_status(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;

    let result = harness
        .service
        .change_status(task.id(), TaskStatus::Done, OUTSIDER)
        .await;

    ensure!(matches!(
        result,
        Err(TaskLifecycleError::NotATeamMember { .. })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_is_reported(harness: Harness) -> eyre::Result<()> {
    seed_team(&harness).await?;

    let result = harness
        .service
        .change_status(TaskId::new(), TaskStatus::Done, AUTHOR)
        .await;

    ensure!(matches!(result, Err(TaskLifecycleError::TaskNotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_are_validated_and_persisted(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;

    let updated = harness
        .service
        .edit_fields(
            task.id(),
            TaskFieldEdits {
                title: Some("Ship the release".to_owned()),
                priority: Some(Priority::High),
                ..TaskFieldEdits::default()
            },
            AUTHOR,
        )
        .await?;

    ensure!(updated.title() == "Ship the release");
    let stored = harness.tasks.find_by_id(task.id()).await?;
    ensure!(stored.as_ref() == Some(&updated));

    let result = harness
        .service
        .edit_fields(
            task.id(),
            TaskFieldEdits {
                title: Some(String::new()),
                ..TaskFieldEdits::default()
            },
            AUTHOR,
        )
        .await;
    ensure!(matches!(result, Err(TaskLifecycleError::Domain(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn author_can_delete_their_task_with_cascades(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;
    harness
        .service
        .add_comment(task.id(), ASSIGNEE, "on it")
        .await?;
    ensure!(
        harness
            .ledger
            .record(task.id(), WindowKind::TwentyFourHours)
            .await?
    );

    harness.service.delete_task(task.id(), AUTHOR).await?;

    ensure!(harness.tasks.find_by_id(task.id()).await?.is_none());
    ensure!(harness.tasks.comments(task.id()).await?.is_empty());
    ensure!(
        !harness
            .ledger
            .is_recorded(task.id(), WindowKind::TwentyFourHours)
            .await?
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_can_delete_any_task_but_members_cannot(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;

    let result = harness.service.delete_task(task.id(), ASSIGNEE).await;
    let Err(TaskLifecycleError::DeletionDenied { task: denied, actor }) = result else {
        bail!("expected deletion denial, got {result:?}");
    };
    ensure!(denied == task.id());
    ensure!(actor == ASSIGNEE);
    ensure!(harness.tasks.find_by_id(task.id()).await?.is_some());

    harness.service.delete_task(task.id(), ADMIN).await?;
    ensure!(harness.tasks.find_by_id(task.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_notifies_author_and_assignee_once_each(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;

    let comment = harness
        .service
        .add_comment(task.id(), ADMIN, "please prioritise")
        .await?;

    ensure!(comment.text() == "please prioritise");
    ensure!(harness.service.comments(task.id()).await? == vec![comment]);
    ensure!(harness.transport.deliveries_to(AUTHOR).len() == 1);
    ensure!(harness.transport.deliveries_to(ASSIGNEE).len() == 1);
    ensure!(harness.transport.deliveries_to(ADMIN).is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commenter_is_not_notified_about_their_own_comment(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;

    harness
        .service
        .add_comment(task.id(), AUTHOR, "self reminder")
        .await?;

    ensure!(harness.transport.deliveries_to(AUTHOR).is_empty());
    ensure!(harness.transport.deliveries_to(ASSIGNEE).len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delivery_failure_does_not_fail_the_operation(harness: Harness) -> eyre::Result<()> {
    let team = seed_team(&harness).await?;
    let task = seed_task(&harness, team).await?;
    harness.transport.fail_for(AUTHOR);

    let updated = harness
        .service
        .change_status(task.id(), TaskStatus::Done, ASSIGNEE)
        .await?;

    ensure!(updated.status() == TaskStatus::Done);
    ensure!(harness.transport.deliveries_to(AUTHOR).is_empty());
    Ok(())
}
