//! Behaviour tests for the hiring, cooldown and termination flows.

#[path = "engagement_lifecycle_steps/mod.rs"]
mod engagement_lifecycle_steps_defs;

use engagement_lifecycle_steps_defs::world::{EngagementWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/engagement_lifecycle.feature",
    name = "Hiring a tasker through to a finished job"
)]
#[tokio::test(flavor = "multi_thread")]
async fn hiring_through_to_finish(world: EngagementWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/engagement_lifecycle.feature",
    name = "Reapplying after withdrawing waits for the cooldown"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reapplying_after_withdrawal(world: EngagementWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/engagement_lifecycle.feature",
    name = "A terminated tasker cannot reapply to a started job"
)]
#[tokio::test(flavor = "multi_thread")]
async fn terminated_tasker_reapplies(world: EngagementWorld) {
    let _ = world;
}
