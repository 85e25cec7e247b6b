//! Then steps for engagement lifecycle BDD scenarios.

use super::world::{EngagementWorld, run_async};
use engagement::engagement::{
    domain::{ApplicationStatus, EngagementDomainError, JobStatus},
    services::EngagementServiceError,
};
use rstest_bdd_macros::then;

#[then(r#"the job is "{status}""#)]
fn job_is(world: &EngagementWorld, status: String) -> Result<(), eyre::Report> {
    let expected = JobStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let job = world.job()?;
    if job.status() != expected {
        return Err(eyre::eyre!("expected job {expected}, found {}", job.status()));
    }
    Ok(())
}

#[then(r#"the application is "{status}""#)]
fn application_is(world: &EngagementWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ApplicationStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let application = world.application()?;
    if application.status() != expected {
        return Err(eyre::eyre!(
            "expected application {expected}, found {}",
            application.status()
        ));
    }
    Ok(())
}

fn customer_ratings_complete(world: &EngagementWorld) -> Result<bool, eyre::Report> {
    let job_id = world.job()?.id();
    Ok(run_async(world.ratings.all_customer_ratings_complete(job_id))?)
}

#[then("the customer has not completed their ratings")]
fn ratings_incomplete(world: &EngagementWorld) -> Result<(), eyre::Report> {
    if customer_ratings_complete(world)? {
        return Err(eyre::eyre!("expected outstanding customer ratings"));
    }
    Ok(())
}

#[then("the customer has completed their ratings")]
fn ratings_complete(world: &EngagementWorld) -> Result<(), eyre::Report> {
    if !customer_ratings_complete(world)? {
        return Err(eyre::eyre!("expected every hired tasker to be rated"));
    }
    Ok(())
}

#[then("the application is refused with a cooldown of {seconds:u64} seconds")]
fn refused_with_cooldown(world: &EngagementWorld, seconds: u64) -> Result<(), eyre::Report> {
    let result = world
        .last_apply_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing apply result"))?;
    match result {
        Err(EngagementServiceError::Domain(EngagementDomainError::CooldownActive {
            remaining_seconds,
            ..
        })) if *remaining_seconds == seconds => Ok(()),
        other => Err(eyre::eyre!(
            "expected a {seconds}s cooldown refusal, got {other:?}"
        )),
    }
}

#[then("the application is refused as an invalid transition")]
fn refused_as_invalid_transition(world: &EngagementWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_apply_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing apply result"))?;
    if !matches!(
        result,
        Err(EngagementServiceError::Domain(
            EngagementDomainError::InvalidJobTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected InvalidJobTransition, got {result:?}"));
    }
    Ok(())
}

#[then("a new pending application is created")]
fn new_pending_application(world: &EngagementWorld) -> Result<(), eyre::Report> {
    let first = world
        .first_application
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing first application"))?;
    let created = match world.last_apply_result.as_ref() {
        Some(Ok(created)) => created,
        other => return Err(eyre::eyre!("expected a successful reapplication, got {other:?}")),
    };
    if created.status() != ApplicationStatus::Pending || created.id() == first.id() {
        return Err(eyre::eyre!(
            "expected a distinct pending application, got {} ({})",
            created.id(),
            created.status()
        ));
    }
    Ok(())
}
