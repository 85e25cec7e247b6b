//! Posting, applying, hiring and moving jobs through their lifecycle.

use super::helpers::{ALICE, BOB, CUSTOMER, Marketplace, STRANGER, marketplace, ok, refused, token};
use engagement::{
    engagement::{
        domain::{ApplicationStatus, JobStatus},
        ports::{ApplicationQuery, MatchPercentage},
    },
    transport::{ErrorCode, NewJob},
};
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hire_start_and_finish_a_job(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Hang kitchen cabinets").await?;

    let application = ok(market.apply(ALICE, job_id).await)?;
    ensure!(application.status() == ApplicationStatus::Pending);
    let accepted = ok(market
        .patch(CUSTOMER, application.id(), ApplicationStatus::Accepted, None)
        .await)?;
    ensure!(accepted.status() == ApplicationStatus::Accepted);
    let started = ok(market.api.start_job(&token(CUSTOMER), job_id).await)?;
    ensure!(started.status() == JobStatus::InProgress);
    let finished = ok(market.api.finish_job(&token(CUSTOMER), job_id).await)?;
    ensure!(finished.status() == JobStatus::Finished);

    let obligations = ok(market
        .api
        .rating_obligations(&token(CUSTOMER), job_id)
        .await)?;
    ensure!(obligations.active);
    ensure!(!obligations.all_customer_ratings_complete());
    ensure!(obligations.outstanding_customer_reviews() == vec![ALICE.user_id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_customers_post_jobs(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;

    let error = refused(
        market
            .api
            .create_job(
                &token(ALICE),
                NewJob {
                    title: "Sneaky job".to_owned(),
                    description: None,
                    budget: None,
                    required_skills: Vec::new(),
                },
            )
            .await,
    )?;

    ensure!(error.code == ErrorCode::Forbidden);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_cannot_hire(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Fit a door").await?;
    let application = ok(market.apply(ALICE, job_id).await)?;

    let error = refused(
        market
            .patch(STRANGER, application.id(), ApplicationStatus::Accepted, None)
            .await,
    )?;

    ensure!(error.code == ErrorCode::Forbidden);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn starting_needs_a_hire(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Lay a patio").await?;
    ok(market.apply(ALICE, job_id).await)?;

    let error = refused(market.api.start_job(&token(CUSTOMER), job_id).await)?;

    ensure!(error.code == ErrorCode::InvalidTransition);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_live_applications_are_refused(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Wire a socket").await?;
    ok(market.apply(ALICE, job_id).await)?;

    let error = refused(market.apply(ALICE, job_id).await)?;

    ensure!(error.code == ErrorCode::InvalidTransition);
    ensure!(error.cooldown_remaining_seconds.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminated_taskers_meet_a_closed_job(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let (job_id, hired) = market.job_in_progress(&[ALICE]).await?;
    let [application_id] = hired.as_slice() else {
        eyre::bail!("expected one hire");
    };

    let missing_reason = refused(
        market
            .patch(CUSTOMER, *application_id, ApplicationStatus::Rejected, None)
            .await,
    )?;
    let fired = ok(market
        .patch(
            CUSTOMER,
            *application_id,
            ApplicationStatus::Rejected,
            Some("missed deadline"),
        )
        .await)?;
    let reapply = refused(market.apply(ALICE, job_id).await)?;

    ensure!(missing_reason.code == ErrorCode::InvalidInput);
    ensure!(fired.status() == ApplicationStatus::Rejected);
    ensure!(reapply.code == ErrorCode::InvalidTransition);
    ensure!(reapply.cooldown_remaining_seconds.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn finished_jobs_cannot_be_cancelled(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let (job_id, _) = market.job_in_progress(&[ALICE]).await?;
    ok(market.api.finish_job(&token(CUSTOMER), job_id).await)?;

    let error = refused(market.api.cancel_job(&token(CUSTOMER), job_id).await)?;

    ensure!(error.code == ErrorCode::InvalidTransition);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_progress_jobs_can_be_cancelled(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let (job_id, _) = market.job_in_progress(&[ALICE, BOB]).await?;

    let cancelled = ok(market.api.cancel_job(&token(CUSTOMER), job_id).await)?;

    ensure!(cancelled.status() == JobStatus::Cancelled);
    ensure!(market.publisher.published_types().last() == Some(&"job_cancelled"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn applications_list_by_job_and_tasker(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let first_job = market.post_job("Clean gutters").await?;
    let second_job = market.post_job("Trim hedges").await?;
    ok(market.apply(ALICE, first_job).await)?;
    ok(market.apply(BOB, first_job).await)?;
    ok(market.apply(ALICE, second_job).await)?;

    let by_job = ok(market
        .api
        .list_applications(&token(CUSTOMER), ApplicationQuery::for_job(first_job))
        .await)?;
    let by_tasker = ok(market
        .api
        .list_applications(&token(ALICE), ApplicationQuery::for_tasker(ALICE.user_id()))
        .await)?;

    ensure!(by_job.len() == 2);
    ensure!(by_tasker.len() == 2);
    ensure!(by_tasker.iter().all(|application| application.tasker_id() == ALICE.user_id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn matches_follow_the_scorer(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Build a pergola").await?;
    market.scorer.set_score(job_id, ALICE.user_id(), 62)?;
    market.scorer.set_score(job_id, BOB.user_id(), 88)?;

    let matches = ok(market.api.job_matches(&token(CUSTOMER), job_id).await)?;

    let order: Vec<_> = matches
        .iter()
        .map(|score| (score.tasker_id, score.match_percentage.value()))
        .collect();
    ensure!(order == vec![(BOB.user_id(), 88), (ALICE.user_id(), 62)]);
    ensure!(matches.iter().all(|score| score.match_percentage <= MatchPercentage::MAX));
    Ok(())
}
