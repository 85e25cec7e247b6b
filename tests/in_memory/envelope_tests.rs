//! Response shape and error codes seen by callers.

use super::helpers::{ALICE, CUSTOMER, Marketplace, marketplace, ok, refused, token};
use engagement::{
    engagement::domain::{ApplicationStatus, JobId},
    identity::domain::SessionToken,
    transport::{ApplicationPatch, Envelope, ErrorBody, ErrorCode, NewReview},
};
use eyre::ensure;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn success_envelopes_carry_camel_case_data(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Seal a driveway").await?;

    let envelope = market.apply(ALICE, job_id).await;
    let body = serde_json::to_value(&envelope)?;

    ensure!(body["ok"] == json!(true));
    ensure!(body.get("error").is_none());
    ensure!(body["data"]["jobId"] == json!(job_id.value()));
    ensure!(body["data"]["taskerId"] == json!(ALICE.user_id().value()));
    ensure!(body["data"]["status"] == json!("pending"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cooldown_failures_report_remaining_seconds(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Service a boiler").await?;
    let first = ok(market.apply(ALICE, job_id).await)?;
    ok(market
        .patch(ALICE, first.id(), ApplicationStatus::Withdrawn, None)
        .await)?;

    let body = serde_json::to_value(market.apply(ALICE, job_id).await)?;

    ensure!(body["ok"] == json!(false));
    ensure!(body.get("data").is_none());
    ensure!(body["error"]["code"] == json!("CooldownActive"));
    ensure!(body["error"]["cooldownRemainingSeconds"] == json!(3600));
    ensure!(body["error"]["message"].as_str().is_some_and(|text| text.contains("60 minutes")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_sessions_are_unauthenticated(
    marketplace: eyre::Result<Marketplace>,
) -> eyre::Result<()> {
    let market = marketplace?;
    let job_id = market.post_job("Clear a drain").await?;

    let error = refused(
        market
            .api
            .start_job(&SessionToken::new("forged"), job_id)
            .await,
    )?;

    ensure!(error.code == ErrorCode::Unauthenticated);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_records_are_not_found(marketplace: eyre::Result<Marketplace>) -> eyre::Result<()> {
    let market = marketplace?;

    let job = refused(market.api.finish_job(&token(CUSTOMER), JobId::new(999)).await)?;
    let review = refused(
        market
            .api
            .submit_review(
                &token(CUSTOMER),
                NewReview {
                    job_id: JobId::new(999),
                    ratee_id: ALICE.user_id(),
                    rating: 5,
                    comment: None,
                },
            )
            .await,
    )?;

    ensure!(job.code == ErrorCode::NotFound);
    ensure!(review.code == ErrorCode::NotFound);
    Ok(())
}

#[rstest]
fn request_bodies_decode_from_camel_case() -> eyre::Result<()> {
    let patch: ApplicationPatch =
        serde_json::from_value(json!({"status": "rejected", "reason": "no show"}))?;
    let review: NewReview =
        serde_json::from_value(json!({"jobId": 7, "rateeId": 3, "rating": 4}))?;

    ensure!(patch.status == ApplicationStatus::Rejected);
    ensure!(patch.reason.as_deref() == Some("no show"));
    ensure!(review.job_id == JobId::new(7));
    ensure!(review.comment.is_none());
    Ok(())
}

#[rstest]
fn envelopes_round_trip_their_outcome() -> eyre::Result<()> {
    let failure: Envelope<u32> = Envelope::failure(ErrorBody::new(ErrorCode::Conflict, "stale"));
    let decoded: Envelope<Value> = serde_json::from_value(serde_json::to_value(&failure)?)?;

    ensure!(!decoded.ok);
    ensure!(decoded.into_result().map_err(|err| err.code) == Err(ErrorCode::Conflict));
    ensure!(Envelope::success(5_u32).into_result() == Ok(5));
    Ok(())
}
