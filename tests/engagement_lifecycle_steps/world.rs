//! Shared world state for engagement lifecycle BDD scenarios.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use engagement::{
    clock::ManualClock,
    engagement::{
        adapters::memory::InMemoryEngagementRepository,
        domain::{Application, Job, ReapplicationCooldown},
        services::{ApplicationLifecycleService, EngagementServiceError, JobLifecycleService},
    },
    events::adapters::memory::InMemoryEventPublisher,
    identity::domain::Actor,
    rating::{adapters::memory::InMemoryReviewRepository, services::RatingService},
};
use rstest::fixture;

/// Job service used by the BDD world.
pub type TestJobService =
    JobLifecycleService<InMemoryEngagementRepository, InMemoryEventPublisher, ManualClock>;

/// Application service used by the BDD world.
pub type TestApplicationService =
    ApplicationLifecycleService<InMemoryEngagementRepository, InMemoryEventPublisher, ManualClock>;

/// Rating service used by the BDD world.
pub type TestRatingService = RatingService<
    InMemoryEngagementRepository,
    InMemoryReviewRepository,
    InMemoryEventPublisher,
    ManualClock,
>;

/// Scenario world for engagement lifecycle behaviour tests.
pub struct EngagementWorld {
    pub clock: Arc<ManualClock>,
    pub jobs: TestJobService,
    pub applications: TestApplicationService,
    pub ratings: TestRatingService,
    pub customer: Option<Actor>,
    pub job: Option<Job>,
    pub application: Option<Application>,
    pub first_application: Option<Application>,
    pub last_apply_result: Option<Result<Application, EngagementServiceError>>,
}

impl EngagementWorld {
    /// Creates a world on a fresh in-memory marketplace.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
                .single()
                .unwrap_or_default(),
        ));
        let boards = Arc::new(InMemoryEngagementRepository::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());

        Self {
            jobs: JobLifecycleService::new(
                Arc::clone(&boards),
                Arc::clone(&publisher),
                Arc::clone(&clock),
            ),
            applications: ApplicationLifecycleService::new(
                Arc::clone(&boards),
                Arc::clone(&publisher),
                Arc::clone(&clock),
                ReapplicationCooldown::default(),
            ),
            ratings: RatingService::new(
                boards,
                Arc::new(InMemoryReviewRepository::new()),
                publisher,
                Arc::clone(&clock),
            ),
            clock,
            customer: None,
            job: None,
            application: None,
            first_application: None,
            last_apply_result: None,
        }
    }

    /// Returns the job posted by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no job has been posted yet.
    pub fn job(&self) -> Result<&Job, eyre::Report> {
        self.job
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing job in scenario world"))
    }

    /// Returns the current application of the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if nobody has applied yet.
    pub fn application(&self) -> Result<&Application, eyre::Report> {
        self.application
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing application in scenario world"))
    }

    /// Returns the job owner.
    ///
    /// # Errors
    ///
    /// Returns an error if no customer has posted yet.
    pub fn customer(&self) -> Result<Actor, eyre::Report> {
        self.customer
            .ok_or_else(|| eyre::eyre!("missing customer in scenario world"))
    }
}

impl Default for EngagementWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> EngagementWorld {
    EngagementWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
