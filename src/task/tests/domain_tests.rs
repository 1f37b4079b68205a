//! Unit tests for the task aggregate and status transitions.

use mockable::Clock;
use crate::task::domain::{
    Comment, NewTaskData, Priority, Task, TaskDomainError, TaskFieldEdits, TaskStatus,
};
use crate::team::domain::{TeamId, UserId};
use crate::testing::FixedClock;
use eyre::{bail, ensure};
use rstest::{fixture, rstest};

const ALL_STATUSES: [TaskStatus; 4] = [
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Done,
    TaskStatus::Cancelled,
];

#[fixture]
fn clock() -> FixedClock {
    FixedClock::at(2024, 3, 1, 9, 0)
}

fn new_task_data(title: impl Into<String>) -> NewTaskData {
    NewTaskData {
        team: TeamId::new(),
        title: title.into(),
        description: None,
        assignee: None,
        author: UserId::new(1),
        deadline: None,
        priority: Priority::default(),
    }
}

#[rstest]
fn new_task_starts_in_todo_with_trimmed_title(clock: FixedClock) -> eyre::Result<()> {
    let task = Task::new(new_task_data("  Ship the beta  "), &clock)?;

    ensure!(task.title() == "Ship the beta");
    ensure!(task.status() == TaskStatus::Todo);
    ensure!(task.priority() == Priority::Medium);
    ensure!(task.completed_at().is_none());
    ensure!(task.created_at() == clock.utc());
    ensure!(task.updated_at() == clock.utc());
    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_title_is_rejected(#[case] title: &str, clock: FixedClock) {
    let result = Task::new(new_task_data(title), &clock);
    assert_eq!(result, Err(TaskDomainError::InvalidTitle));
}

#[rstest]
fn overlong_title_is_rejected(clock: FixedClock) -> eyre::Result<()> {
    let result = Task::new(new_task_data("x".repeat(201)), &clock);
    ensure!(result == Err(TaskDomainError::InvalidTitle));

    let task = Task::new(new_task_data("x".repeat(200)), &clock)?;
    ensure!(task.title().chars().count() == 200);
    Ok(())
}

#[rstest]
fn overlong_description_is_rejected(clock: FixedClock) {
    let mut data = new_task_data("Ship the beta");
    data.description = Some("d".repeat(1001));
    let result = Task::new(data, &clock);
    assert_eq!(result, Err(TaskDomainError::DescriptionTooLong));
}

#[rstest]
fn any_status_reaches_any_other(clock: FixedClock) -> eyre::Result<()> {
    for from in ALL_STATUSES {
        for to in ALL_STATUSES {
            let mut task = Task::new(new_task_data("Ship the beta"), &clock)?;
            task.set_status(from, &clock);
            task.set_status(to, &clock);
            ensure!(task.status() == to);
        }
    }
    Ok(())
}

#[rstest]
fn entering_done_stamps_completed_at_once(clock: FixedClock) -> eyre::Result<()> {
    let mut task = Task::new(new_task_data("Ship the beta"), &clock)?;

    clock.advance(chrono::Duration::hours(1));
    task.set_status(TaskStatus::Done, &clock);
    let first_completion = task.completed_at();
    ensure!(first_completion == Some(clock.utc()));

    // Regress, advance time, complete again: the original stamp survives.
    clock.advance(chrono::Duration::hours(1));
    task.set_status(TaskStatus::InProgress, &clock);
    ensure!(task.completed_at() == first_completion);

    clock.advance(chrono::Duration::hours(1));
    task.set_status(TaskStatus::Done, &clock);
    ensure!(task.completed_at() == first_completion);
    ensure!(task.updated_at() == clock.utc());
    Ok(())
}

#[rstest]
#[case(TaskStatus::Todo, false)]
#[case(TaskStatus::InProgress, false)]
#[case(TaskStatus::Done, true)]
#[case(TaskStatus::Cancelled, true)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
fn apply_edits_writes_and_clears_fields(clock: FixedClock) -> eyre::Result<()> {
    let mut data = new_task_data("Ship the beta");
    data.description = Some("Initial description".to_owned());
    data.assignee = Some(UserId::new(2));
    let mut task = Task::new(data, &clock)?;

    clock.advance(chrono::Duration::minutes(5));
    task.apply_edits(
        TaskFieldEdits {
            title: Some("Ship the release".to_owned()),
            description: Some(None),
            assignee: Some(Some(UserId::new(3))),
            deadline: None,
            priority: Some(Priority::High),
            tags: Some(Some("release".to_owned())),
        },
        &clock,
    )?;

    ensure!(task.title() == "Ship the release");
    ensure!(task.description().is_none());
    ensure!(task.assignee() == Some(UserId::new(3)));
    ensure!(task.priority() == Priority::High);
    ensure!(task.tags() == Some("release"));
    ensure!(task.updated_at() == clock.utc());
    Ok(())
}

#[rstest]
fn failed_edit_leaves_the_task_untouched(clock: FixedClock) -> eyre::Result<()> {
    let mut task = Task::new(new_task_data("Ship the beta"), &clock)?;
    let before = task.clone();

    let result = task.apply_edits(
        TaskFieldEdits {
            title: Some(String::new()),
            priority: Some(Priority::Low),
            ..TaskFieldEdits::default()
        },
        &clock,
    );

    if result != Err(TaskDomainError::InvalidTitle) {
        bail!("expected invalid title, got {result:?}");
    }
    ensure!(task == before);
    Ok(())
}

#[rstest]
fn comment_text_is_trimmed(clock: FixedClock) -> eyre::Result<()> {
    let task = Task::new(new_task_data("Ship the beta"), &clock)?;
    let comment = Comment::new(task.id(), UserId::new(2), "  looks good  ", &clock)?;

    ensure!(comment.text() == "looks good");
    ensure!(comment.task() == task.id());
    Ok(())
}

#[rstest]
#[case("")]
#[case("   \n ")]
fn empty_comment_is_rejected(#[case] text: &str, clock: FixedClock) -> eyre::Result<()> {
    let task = Task::new(new_task_data("Ship the beta"), &clock)?;
    let result = Comment::new(task.id(), UserId::new(2), text, &clock);
    ensure!(result == Err(TaskDomainError::EmptyComment));
    Ok(())
}
