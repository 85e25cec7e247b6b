//! Reviews exchanged once a job is finished.

use super::helpers::{ALICE, BOB, CUSTOMER, Marketplace, marketplace, ok, refused, token};
use engagement::{
    engagement::domain::{ApplicationStatus, JobId},
    identity::domain::Actor,
    rating::domain::RaterRole,
    transport::{ErrorCode, NewReview, ReviewPatch},
};
use eyre::ensure;
use rstest::rstest;

fn review_of(job_id: JobId, ratee: Actor, rating: u8) -> NewReview {
    NewReview {
        job_id,
        ratee_id: ratee.user_id(),
        rating,
        comment: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn customer_ratings_complete_once_every_hire_is_rated(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let (job_id, _) = market.job_in_progress(&[ALICE, BOB]).await?;
    ok(market.api.finish_job(&token(CUSTOMER), job_id).await)?;

    ok(market
        .api
        .submit_review(&token(CUSTOMER), review_of(job_id, ALICE, 5))
        .await)?;
    let partial = ok(market
        .api
        .rating_obligations(&token(CUSTOMER), job_id)
        .await)?;
    ok(market
        .api
        .submit_review(&token(CUSTOMER), review_of(job_id, BOB, 4))
        .await)?;
    let complete = ok(market
        .api
        .rating_obligations(&token(CUSTOMER), job_id)
        .await)?;

    ensure!(!partial.all_customer_ratings_complete());
    ensure!(complete.all_customer_ratings_complete());
    ensure!(complete.outstanding_tasker_reviews() == vec![ALICE.user_id(), BOB.user_id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resigned_taskers_still_rate_the_customer(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let (job_id, hired) = market.job_in_progress(&[ALICE, BOB]).await?;
    let [_, bob_application] = hired.as_slice() else {
        eyre::bail!("expected two hires");
    };
    ok(market
        .patch(
            BOB,
            *bob_application,
            ApplicationStatus::Withdrawn,
            Some("family emergency"),
        )
        .await)?;
    ok(market.api.finish_job(&token(CUSTOMER), job_id).await)?;

    let customer_on_bob = refused(
        market
            .api
            .submit_review(&token(CUSTOMER), review_of(job_id, BOB, 3))
            .await,
    )?;
    let bob_on_customer = ok(market
        .api
        .submit_review(&token(BOB), review_of(job_id, CUSTOMER, 4))
        .await)?;
    ok(market
        .api
        .submit_review(&token(CUSTOMER), review_of(job_id, ALICE, 5))
        .await)?;
    let obligations = ok(market
        .api
        .rating_obligations(&token(BOB), job_id)
        .await)?;

    ensure!(customer_on_bob.code == ErrorCode::NotEligible);
    ensure!(bob_on_customer.rater_role() == RaterRole::Tasker);
    ensure!(obligations.all_customer_ratings_complete());
    ensure!(obligations.tasker_has_rated_customer(BOB.user_id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reviews_are_unique_and_edited_once(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let (job_id, _) = market.job_in_progress(&[ALICE]).await?;
    ok(market.api.finish_job(&token(CUSTOMER), job_id).await)?;
    let review = ok(market
        .api
        .submit_review(&token(ALICE), review_of(job_id, CUSTOMER, 2))
        .await)?;

    let duplicate = refused(
        market
            .api
            .submit_review(&token(ALICE), review_of(job_id, CUSTOMER, 5))
            .await,
    )?;
    let by_customer = refused(
        market
            .api
            .edit_review(
                &token(CUSTOMER),
                review.id(),
                ReviewPatch {
                    rating: 5,
                    comment: None,
                },
            )
            .await,
    )?;
    let edited = ok(market
        .api
        .edit_review(
            &token(ALICE),
            review.id(),
            ReviewPatch {
                rating: 4,
                comment: Some("Paid promptly after all".to_owned()),
            },
        )
        .await)?;
    let second_edit = refused(
        market
            .api
            .edit_review(
                &token(ALICE),
                review.id(),
                ReviewPatch {
                    rating: 1,
                    comment: None,
                },
            )
            .await,
    )?;

    ensure!(duplicate.code == ErrorCode::AlreadyReviewed);
    ensure!(by_customer.code == ErrorCode::Forbidden);
    ensure!(edited.is_edited());
    ensure!(edited.comment() == Some("Paid promptly after all"));
    ensure!(second_edit.code == ErrorCode::AlreadyEdited);
    Ok(())
}

#[rstest]
#[case(0)]
#[case(6)]
#[tokio::test(flavor = "multi_thread")]
async fn ratings_outside_one_to_five_are_invalid(
    marketplace: eyre::Result<Marketplace>,
    #[case] rating: u8,
) -> eyre::Result<()> {
    let market = marketplace?;
    let (job_id, _) = market.job_in_progress(&[ALICE]).await?;
    ok(market.api.finish_job(&token(CUSTOMER), job_id).await)?;

    let error = refused(
        market
            .api
            .submit_review(&token(CUSTOMER), review_of(job_id, ALICE, rating))
            .await,
    )?;

    ensure!(error.code == ErrorCode::InvalidInput);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_progress_jobs_cannot_be_rated(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let (job_id, _) = market.job_in_progress(&[ALICE]).await?;

    let error = refused(
        market
            .api
            .submit_review(&token(CUSTOMER), review_of(job_id, ALICE, 5))
            .await,
    )?;
    let obligations = ok(market
        .api
        .rating_obligations(&token(CUSTOMER), job_id)
        .await)?;

    ensure!(error.code == ErrorCode::NotEligible);
    ensure!(!obligations.active);
    Ok(())
}
