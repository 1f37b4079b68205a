//! Team creation, invite joining, and tier ceilings through the service layer.

use eyre::ensure;
use rstest::{fixture, rstest};
use taskherd::team::domain::{InviteCode, Role, SubscriptionTier, UserId};
use taskherd::team::ports::TeamRepository;
use taskherd::team::services::TeamServiceError;

use super::helpers::TestEnvironment;

const OWNER: UserId = UserId::new(1);

#[fixture]
fn env() -> TestEnvironment {
    TestEnvironment::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_a_team_seats_the_owner(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_service
        .create_team("Platform", OWNER, InviteCode::new("plat-1")?)
        .await?;

    ensure!(env.teams.member_role(team.id(), OWNER).await? == Some(Role::Owner));
    ensure!(env.teams.member_count(team.id()).await? == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_join_through_the_invite_code(env: TestEnvironment) -> eyre::Result<()> {
    let joiner = UserId::new(2);
    let team = env
        .team_service
        .create_team("Platform", OWNER, InviteCode::new("plat-1")?)
        .await?;

    let membership = env
        .team_service
        .join_via_invite(team.invite_code(), joiner)
        .await?;

    ensure!(membership.role == Role::Member);
    ensure!(env.teams.member_count(team.id()).await? == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_unknown_invite_code_is_rejected(env: TestEnvironment) -> eyre::Result<()> {
    env.team_service
        .create_team("Platform", OWNER, InviteCode::new("plat-1")?)
        .await?;

    let code = InviteCode::new("nobody-home")?;
    let outcome = env.team_service.join_via_invite(&code, UserId::new(2)).await;

    ensure!(matches!(
        outcome,
        Err(TeamServiceError::UnknownInviteCode(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upgrading_the_tier_lifts_the_member_ceiling(env: TestEnvironment) -> eyre::Result<()> {
    let team = env
        .team_service
        .create_team("Platform", OWNER, InviteCode::new("plat-1")?)
        .await?;
    for n in 2..=3 {
        env.team_service
            .join_via_invite(team.invite_code(), UserId::new(n))
            .await?;
    }

    // The free tier seats three; the fourth member is turned away.
    let refused = env
        .team_service
        .join_via_invite(team.invite_code(), UserId::new(4))
        .await;
    ensure!(matches!(
        refused,
        Err(TeamServiceError::LimitExceeded(decision))
            if decision.current == 3 && decision.limit == Some(3)
    ));

    env.teams
        .set_tier(team.id(), SubscriptionTier::Pro, None)
        .await?;
    env.team_service
        .join_via_invite(team.invite_code(), UserId::new(4))
        .await?;
    ensure!(env.teams.member_count(team.id()).await? == 4);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_managers_remove_members_and_never_the_owner(
    env: TestEnvironment,
) -> eyre::Result<()> {
    let member = UserId::new(2);
    let bystander = UserId::new(3);
    let team = env
        .team_with_members("Platform", "plat-1", OWNER, &[member, bystander])
        .await?;

    let denied = env
        .team_service
        .remove_member(team.id(), member, bystander)
        .await;
    ensure!(matches!(
        denied,
        Err(TeamServiceError::AuthorizationDenied { .. })
    ));

    let owner_shielded = env
        .team_service
        .remove_member(team.id(), OWNER, OWNER)
        .await;
    ensure!(matches!(
        owner_shielded,
        Err(TeamServiceError::CannotRemoveOwner { .. })
    ));

    env.team_service
        .remove_member(team.id(), OWNER, bystander)
        .await?;
    ensure!(env.teams.member_count(team.id()).await? == 2);
    Ok(())
}
