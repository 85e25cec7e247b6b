//! When steps for engagement lifecycle BDD scenarios.

use super::world::{EngagementWorld, run_async};
use chrono::TimeDelta;
use engagement::{
    engagement::services::ApplyRequest,
    identity::domain::{Actor, UserId},
    rating::services::SubmitReviewRequest,
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the customer accepts the application")]
fn customer_accepts(world: &mut EngagementWorld) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let application_id = world.application()?.id();
    let accepted = run_async(world.applications.accept(application_id, customer))
        .wrap_err("accept application")?;
    world.application = Some(accepted);
    Ok(())
}

#[when("the customer starts the job")]
fn customer_starts(world: &mut EngagementWorld) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let job_id = world.job()?.id();
    let started = run_async(world.jobs.start_job(job_id, customer)).wrap_err("start job")?;
    world.job = Some(started);
    Ok(())
}

#[when("the customer finishes the job")]
fn customer_finishes(world: &mut EngagementWorld) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let job_id = world.job()?.id();
    let finished = run_async(world.jobs.finish_job(job_id, customer)).wrap_err("finish job")?;
    world.job = Some(finished);
    Ok(())
}

#[when("the customer rates tasker {tasker_id:i64} with {stars:u8} stars")]
fn customer_rates(
    world: &mut EngagementWorld,
    tasker_id: i64,
    stars: u8,
) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let job_id = world.job()?.id();
    run_async(world.ratings.submit_review(
        customer,
        SubmitReviewRequest::new(job_id, UserId::new(tasker_id), stars),
    ))
    .wrap_err("submit review")?;
    Ok(())
}

#[when("the tasker withdraws the application")]
fn tasker_withdraws(world: &mut EngagementWorld) -> Result<(), eyre::Report> {
    let application = world.application()?;
    let tasker = Actor::tasker(application.tasker_id());
    let withdrawn = run_async(world.applications.withdraw(application.id(), tasker))
        .wrap_err("withdraw application")?;
    world.application = Some(withdrawn);
    Ok(())
}

#[when(r#"the customer terminates the application because "{reason}""#)]
fn customer_terminates(world: &mut EngagementWorld, reason: String) -> Result<(), eyre::Report> {
    let customer = world.customer()?;
    let application_id = world.application()?.id();
    let terminated = run_async(world.applications.terminate(application_id, customer, &reason))
        .wrap_err("terminate application")?;
    world.application = Some(terminated);
    Ok(())
}

#[when("tasker {tasker_id:i64} applies to the job again")]
fn tasker_reapplies(world: &mut EngagementWorld, tasker_id: i64) -> Result<(), eyre::Report> {
    let job_id = world.job()?.id();
    let result = run_async(
        world
            .applications
            .apply(Actor::tasker(UserId::new(tasker_id)), ApplyRequest::new(job_id)),
    );
    if let Ok(ref created) = result {
        world.application = Some(created.clone());
    }
    world.last_apply_result = Some(result);
    Ok(())
}

#[when("{minutes:i64} minutes pass")]
fn minutes_pass(world: &mut EngagementWorld, minutes: i64) {
    world.clock.advance(TimeDelta::minutes(minutes));
}
