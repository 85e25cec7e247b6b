//! Withdrawal and the one-hour reapplication window.

use super::helpers::{ALICE, BOB, CUSTOMER, Marketplace, marketplace, ok, refused, token};
use chrono::TimeDelta;
use engagement::{
    engagement::domain::{ApplicationStatus, ReapplicationStatus},
    transport::ErrorCode,
};
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn withdrawal_blocks_reapplication_for_an_hour(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Paint a bedroom").await?;
    let first = ok(market.apply(ALICE, job_id).await)?;
    let withdrawn = ok(market
        .patch(ALICE, first.id(), ApplicationStatus::Withdrawn, None)
        .await)?;
    ensure!(withdrawn.status() == ApplicationStatus::Withdrawn);

    let immediate = refused(market.apply(ALICE, job_id).await)?;
    ensure!(immediate.code == ErrorCode::CooldownActive);
    ensure!(immediate.cooldown_remaining_seconds == Some(3600));
    ensure!(immediate.message.contains("60 minutes"));

    market.clock.advance(TimeDelta::minutes(61));
    let second = ok(market.apply(ALICE, job_id).await)?;

    ensure!(second.status() == ApplicationStatus::Pending);
    ensure!(second.id() != first.id());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remaining_time_counts_down(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Replace a tap").await?;
    let first = ok(market.apply(ALICE, job_id).await)?;
    ok(market
        .patch(ALICE, first.id(), ApplicationStatus::Withdrawn, None)
        .await)?;

    market.clock.advance(TimeDelta::seconds(1_079));
    let status = ok(market
        .api
        .reapplication_status(&token(ALICE), job_id)
        .await)?;
    let refusal = refused(market.apply(ALICE, job_id).await)?;

    ensure!(
        status
            == ReapplicationStatus::CoolingDown {
                remaining_seconds: 2_521
            }
    );
    ensure!(refusal.cooldown_remaining_seconds == Some(2_521));
    ensure!(refusal.message.contains("43 minutes"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cooldowns_are_per_tasker_and_job(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let painted = market.post_job("Paint a hallway").await?;
    let tiled = market.post_job("Tile a hallway").await?;
    let first = ok(market.apply(ALICE, painted).await)?;
    ok(market
        .patch(ALICE, first.id(), ApplicationStatus::Withdrawn, None)
        .await)?;

    ok(market.apply(ALICE, tiled).await)?;
    ok(market.apply(BOB, painted).await)?;
    let bob_status = ok(market
        .api
        .reapplication_status(&token(BOB), painted)
        .await)?;

    ensure!(matches!(
        bob_status,
        ReapplicationStatus::LiveApplication { .. }
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_imposes_no_cooldown(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Fix a fence").await?;
    let first = ok(market.apply(ALICE, job_id).await)?;
    ok(market
        .patch(CUSTOMER, first.id(), ApplicationStatus::Rejected, None)
        .await)?;

    let status = ok(market
        .api
        .reapplication_status(&token(ALICE), job_id)
        .await)?;
    let second = ok(market.apply(ALICE, job_id).await)?;

    ensure!(status == ReapplicationStatus::Eligible);
    ensure!(second.status() == ApplicationStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_applicant_withdraws(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Grout a shower").await?;
    let application = ok(market.apply(ALICE, job_id).await)?;

    let by_owner = refused(
        market
            .patch(CUSTOMER, application.id(), ApplicationStatus::Withdrawn, None)
            .await,
    )?;
    let by_rival = refused(
        market
            .patch(BOB, application.id(), ApplicationStatus::Withdrawn, None)
            .await,
    )?;

    ensure!(by_owner.code == ErrorCode::Forbidden);
    ensure!(by_rival.code == ErrorCode::Forbidden);
    Ok(())
}
