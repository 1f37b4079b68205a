//! End-to-end task flows: wizard creation, lifecycle changes, and cleanup.

use eyre::{bail, ensure};
use rstest::{fixture, rstest};
use taskherd::task::domain::{TaskFieldEdits, TaskStatus};
use taskherd::task::ports::TaskRepository;
use taskherd::task::services::{TaskLifecycleError, WizardError};
use taskherd::team::domain::UserId;

use super::helpers::TestEnvironment;

const OWNER: UserId = UserId::new(1);
const MEMBER: UserId = UserId::new(2);

#[fixture]
fn env() -> TestEnvironment {
    TestEnvironment::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_wizard_created_task_reaches_its_assignee(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[MEMBER])
        .await?;

    let task = env
        .create_task(
            team.id(),
            OWNER,
            "Ship the beta",
            Some(MEMBER),
            Some("02.03.2024 09:00"),
        )
        .await?;

    ensure!(env.tasks.find_by_id(task.id()).await?.is_some());
    let notices = env.transport.deliveries_to(MEMBER);
    ensure!(notices.len() == 1);
    let Some(notice) = notices.first() else {
        bail!("assignment notice missing");
    };
    ensure!(notice.contains("Ship the beta"));
    ensure!(notice.contains("02.03.2024 09:00"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_changes_flow_back_to_the_author(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[MEMBER])
        .await?;
    let task = env
        .create_task(team.id(), OWNER, "Ship the beta", Some(MEMBER), None)
        .await?;

    let updated = env
        .lifecycle
        .change_status(task.id(), TaskStatus::InProgress, MEMBER)
        .await?;
    ensure!(updated.status() == TaskStatus::InProgress);

    let notices = env.transport.deliveries_to(OWNER);
    ensure!(notices.len() == 1);
    ensure!(notices.first().is_some_and(|text| text.contains("in_progress")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_survives_a_reopen(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[MEMBER])
        .await?;
    let task = env
        .create_task(team.id(), OWNER, "Ship the beta", None, None)
        .await?;

    let done = env
        .lifecycle
        .change_status(task.id(), TaskStatus::Done, OWNER)
        .await?;
    let Some(finished_at) = done.completed_at() else {
        bail!("completion moment missing");
    };

    env.clock.advance(chrono::Duration::hours(2));
    env.lifecycle
        .change_status(task.id(), TaskStatus::InProgress, OWNER)
        .await?;
    let redone = env
        .lifecycle
        .change_status(task.id(), TaskStatus::Done, OWNER)
        .await?;

    ensure!(redone.completed_at() == Some(finished_at));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_fan_out_and_edits_persist(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[MEMBER])
        .await?;
    let task = env
        .create_task(team.id(), OWNER, "Ship the beta", Some(MEMBER), None)
        .await?;

    let edits = TaskFieldEdits {
        description: Some(Some("Cut the release branch first.".to_owned())),
        ..TaskFieldEdits::default()
    };
    let edited = env.lifecycle.edit_fields(task.id(), edits, OWNER).await?;
    ensure!(edited.description() == Some("Cut the release branch first."));

    env.lifecycle
        .add_comment(task.id(), MEMBER, "Branch is cut.")
        .await?;

    let comments = env.lifecycle.comments(task.id()).await?;
    ensure!(comments.len() == 1);
    // The commenting assignee hears nothing beyond their assignment notice.
    ensure!(env.transport.deliveries_to(MEMBER).len() == 1);
    ensure!(
        env.transport
            .deliveries_to(OWNER)
            .iter()
            .any(|text| text.contains("Branch is cut."))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_is_gated_and_cascades(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[MEMBER])
        .await?;
    let task = env
        .create_task(team.id(), OWNER, "Ship the beta", None, None)
        .await?;
    env.lifecycle
        .add_comment(task.id(), OWNER, "Kick-off notes")
        .await?;

    let denied = env.lifecycle.delete_task(task.id(), MEMBER).await;
    ensure!(matches!(
        denied,
        Err(TaskLifecycleError::DeletionDenied { .. })
    ));

    env.lifecycle.delete_task(task.id(), OWNER).await?;
    ensure!(env.tasks.find_by_id(task.id()).await?.is_none());
    ensure!(env.tasks.comments(task.id()).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_free_tier_stops_the_twenty_first_task(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[])
        .await?;
    for n in 0..20 {
        env.create_task(team.id(), OWNER, &format!("Task {n}"), None, None)
            .await?;
    }

    let refused = env.wizard.begin(team.id(), OWNER).await;

    ensure!(matches!(
        refused,
        Err(WizardError::LimitExceeded(decision))
            if decision.current == 20 && decision.limit == Some(20)
    ));

    // Finishing a task frees a slot.
    let tasks = env.tasks.find_by_team(team.id()).await?;
    let Some(first) = tasks.first() else {
        bail!("seeded tasks missing");
    };
    env.lifecycle
        .change_status(first.id(), TaskStatus::Done, OWNER)
        .await?;
    env.wizard.begin(team.id(), OWNER).await?;
    Ok(())
}
