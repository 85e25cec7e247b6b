//! Given steps for engagement lifecycle BDD scenarios.

use super::world::{EngagementWorld, run_async};
use engagement::{
    engagement::services::{ApplyRequest, JobDetailsRequest},
    identity::domain::{Actor, UserId},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("an open job posted by customer {customer_id:i64}")]
fn open_job(world: &mut EngagementWorld, customer_id: i64) -> Result<(), eyre::Report> {
    let customer = Actor::customer(UserId::new(customer_id));
    let job = run_async(
        world
            .jobs
            .create_job(customer, JobDetailsRequest::new("Repair a garden wall")),
    )
    .wrap_err("post job for scenario")?;
    world.customer = Some(customer);
    world.job = Some(job);
    Ok(())
}

#[given("tasker {tasker_id:i64} has applied to the job")]
fn tasker_applied(world: &mut EngagementWorld, tasker_id: i64) -> Result<(), eyre::Report> {
    let job_id = world.job()?.id();
    let application = run_async(
        world
            .applications
            .apply(Actor::tasker(UserId::new(tasker_id)), ApplyRequest::new(job_id)),
    )
    .wrap_err("apply for scenario")?;
    world.first_application = Some(application.clone());
    world.application = Some(application);
    Ok(())
}
