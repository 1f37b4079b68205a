//! Reminder scenarios across a simulated day: sweeps, digest, and cleanup.

use chrono::{Duration, TimeZone, Utc};
use eyre::{bail, ensure};
use mockable::Clock;
use rstest::{fixture, rstest};
use taskherd::reminder::domain::WindowKind;
use taskherd::reminder::ports::DispatchLedger;
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
async fn an_assignee_is_reminded_three_times_before_the_deadline(
    env: TestEnvironment,
) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[MEMBER])
        .await?;
    // Due tomorrow at the same hour; the clock starts 2024-03-01 09:00.
    env.create_task(
        team.id(),
        OWNER,
        "Ship the beta",
        Some(MEMBER),
        Some("02.03.2024 09:00"),
    )
    .await?;
    let start = env.clock.utc();

    env.scheduler.run_sweep().await?;
    env.clock.set(start + Duration::hours(21));
    env.scheduler.run_sweep().await?;
    env.clock.set(start + Duration::hours(24));
    env.scheduler.run_sweep().await?;

    let notices = env.transport.deliveries_to(MEMBER);
    // Assignment notice plus one reminder per window.
    ensure!(notices.len() == 4);
    ensure!(notices.get(1).is_some_and(|text| text.contains("due tomorrow")));
    ensure!(notices.get(2).is_some_and(|text| text.contains("due soon")));
    ensure!(notices.get(3).is_some_and(|text| text.contains("DEADLINE NOW")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn back_to_back_sweeps_never_double_remind(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[MEMBER])
        .await?;
    env.create_task(
        team.id(),
        OWNER,
        "Ship the beta",
        Some(MEMBER),
        Some("02.03.2024 09:00"),
    )
    .await?;

    let first = env.scheduler.run_sweep().await?;
    ensure!(first.delivered == 1);
    env.clock.advance(Duration::minutes(30));
    let second = env.scheduler.run_sweep().await?;
    ensure!(second.delivered == 0);
    ensure!(second.skipped_recorded == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_morning_digest_covers_today_and_the_backlog(
    env: TestEnvironment,
) -> eyre::Result<()> {
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[MEMBER])
        .await?;
    env.create_task(
        team.id(),
        OWNER,
        "Ship the beta",
        Some(MEMBER),
        Some("02.03.2024 15:00"),
    )
    .await?;

    // The morning of the due date.
    let digest_morning = Utc
        .with_ymd_and_hms(2024, 3, 2, 9, 0, 0)
        .single()
        .unwrap_or(chrono::DateTime::<Utc>::UNIX_EPOCH);
    env.clock.set(digest_morning);
    let outcome = env.scheduler.run_digest().await?;

    ensure!(outcome.delivered == 1);
    let digests: Vec<_> = env
        .transport
        .deliveries_to(MEMBER)
        .into_iter()
        .filter(|text| text.contains("Good morning"))
        .collect();
    ensure!(digests.len() == 1);
    let Some(digest) = digests.first() else {
        bail!("digest missing");
    };
    ensure!(digest.contains("Platform"));
    ensure!(digest.contains("Ship the beta"));
    ensure!(!digest.contains("Overdue:"));

    // A day later the unfinished task has slipped into the backlog.
    env.clock.advance(Duration::days(1));
    env.scheduler.run_digest().await?;
    let followup = env.transport.deliveries_to(MEMBER);
    ensure!(
        followup
            .last()
            .is_some_and(|text| text.contains("Overdue:") && text.contains("Ship the beta"))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_silences_its_reminders(env: TestEnvironment) -> eyre::Result<()> {
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

    env.scheduler.run_sweep().await?;
    ensure!(
        env.ledger
            .is_recorded(task.id(), WindowKind::TwentyFourHours)
            .await?
    );

    env.lifecycle.delete_task(task.id(), OWNER).await?;
    ensure!(
        !env.ledger
            .is_recorded(task.id(), WindowKind::TwentyFourHours)
            .await?
    );

    env.clock.advance(Duration::hours(21));
    let outcome = env.scheduler.run_sweep().await?;
    ensure!(outcome.matched == 0);
    // Assignment notice and the one pre-deletion reminder, nothing since.
    ensure!(env.transport.deliveries_to(MEMBER).len() == 2);
    Ok(())
}
