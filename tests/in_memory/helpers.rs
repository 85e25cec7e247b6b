//! Shared marketplace harness for in-memory integration tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use engagement::{
    clock::ManualClock,
    engagement::{
        adapters::memory::{InMemoryEngagementRepository, StaticMatchScorer},
        domain::{Application, ApplicationId, ApplicationStatus, JobId, ReapplicationCooldown},
        services::{ApplicationLifecycleService, JobLifecycleService, MatchRankingService},
    },
    events::adapters::memory::InMemoryEventPublisher,
    identity::{
        adapters::memory::InMemoryIdentityResolver,
        domain::{Actor, SessionToken, UserId},
    },
    rating::{adapters::memory::InMemoryReviewRepository, services::RatingService},
    transport::{
        ApplicationPatch, EngagementApi, Envelope, ErrorBody, NewApplication, NewJob,
    },
};
use eyre::eyre;
use rstest::fixture;

/// Facade type wired with in-memory adapters.
pub type TestApi = EngagementApi<
    InMemoryIdentityResolver,
    InMemoryEngagementRepository,
    InMemoryReviewRepository,
    InMemoryEventPublisher,
    StaticMatchScorer,
    ManualClock,
>;

/// The job owner.
pub const CUSTOMER: Actor = Actor::customer(UserId::new(100));
/// A customer who owns nothing in the scenarios.
pub const STRANGER: Actor = Actor::customer(UserId::new(101));
/// First applicant.
pub const ALICE: Actor = Actor::tasker(UserId::new(200));
/// Second applicant.
pub const BOB: Actor = Actor::tasker(UserId::new(201));

/// A fully wired engine with handles on its clock, events and scorer.
pub struct Marketplace {
    pub api: TestApi,
    pub clock: Arc<ManualClock>,
    pub publisher: Arc<InMemoryEventPublisher>,
    pub scorer: Arc<StaticMatchScorer>,
}

/// Returns the session token registered for `actor`.
#[must_use]
pub fn token(actor: Actor) -> SessionToken {
    SessionToken::new(format!("session-{}", actor.user_id()))
}

impl Marketplace {
    /// Builds an engine with every test actor signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if a session cannot be registered.
    pub fn new() -> eyre::Result<Self> {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
                .single()
                .ok_or_else(|| eyre!("invalid start time"))?,
        ));
        let identity = Arc::new(InMemoryIdentityResolver::new());
        for actor in [CUSTOMER, STRANGER, ALICE, BOB] {
            identity.sign_in(token(actor), actor)?;
        }
        let boards = Arc::new(InMemoryEngagementRepository::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let scorer = Arc::new(StaticMatchScorer::new());

        let api = EngagementApi::new(
            identity,
            JobLifecycleService::new(
                Arc::clone(&boards),
                Arc::clone(&publisher),
                Arc::clone(&clock),
            ),
            ApplicationLifecycleService::new(
                Arc::clone(&boards),
                Arc::clone(&publisher),
                Arc::clone(&clock),
                ReapplicationCooldown::default(),
            ),
            RatingService::new(
                Arc::clone(&boards),
                Arc::new(InMemoryReviewRepository::new()),
                Arc::clone(&publisher),
                Arc::clone(&clock),
            ),
            MatchRankingService::new(boards, Arc::clone(&scorer)),
        );
        Ok(Self {
            api,
            clock,
            publisher,
            scorer,
        })
    }

    /// Posts a job as [`CUSTOMER`].
    ///
    /// # Errors
    ///
    /// Returns an error if the engine refuses the post.
    pub async fn post_job(&self, title: &str) -> eyre::Result<JobId> {
        let job = ok(self
            .api
            .create_job(
                &token(CUSTOMER),
                NewJob {
                    title: title.to_owned(),
                    description: None,
                    budget: Some(5_000),
                    required_skills: vec!["carpentry".to_owned()],
                },
            )
            .await)?;
        Ok(job.id())
    }

    /// Applies to `job_id` as `tasker` without a cover letter.
    pub async fn apply(&self, tasker: Actor, job_id: JobId) -> Envelope<Application> {
        self.api
            .create_application(
                &token(tasker),
                NewApplication {
                    job_id,
                    cover_letter: None,
                    proposed_budget: None,
                },
            )
            .await
    }

    /// Moves an application to `status` as `actor`.
    pub async fn patch(
        &self,
        actor: Actor,
        application_id: ApplicationId,
        status: ApplicationStatus,
        reason: Option<&str>,
    ) -> Envelope<Application> {
        self.api
            .patch_application(
                &token(actor),
                application_id,
                ApplicationPatch {
                    status,
                    reason: reason.map(str::to_owned),
                },
            )
            .await
    }

    /// Posts a job, hires `taskers` and starts it.
    ///
    /// # Errors
    ///
    /// Returns an error if any step is refused.
    pub async fn job_in_progress(
        &self,
        taskers: &[Actor],
    ) -> eyre::Result<(JobId, Vec<ApplicationId>)> {
        let job_id = self.post_job("Build a shed").await?;
        let mut hired = Vec::new();
        for tasker in taskers {
            let application = ok(self.apply(*tasker, job_id).await)?;
            ok(self
                .patch(CUSTOMER, application.id(), ApplicationStatus::Accepted, None)
                .await)?;
            hired.push(application.id());
        }
        ok(self.api.start_job(&token(CUSTOMER), job_id).await)?;
        Ok((job_id, hired))
    }
}

/// Provides a fresh marketplace for each test.
///
/// # Errors
///
/// Returns an error if the marketplace cannot be built.
#[fixture]
pub fn marketplace() -> eyre::Result<Marketplace> {
    Marketplace::new()
}

/// Unwraps a successful envelope.
///
/// # Errors
///
/// Returns the envelope's error code and message.
pub fn ok<T>(envelope: Envelope<T>) -> eyre::Result<T> {
    envelope
        .into_result()
        .map_err(|err| eyre!("{}: {}", err.code, err.message))
}

/// Unwraps a failed envelope.
///
/// # Errors
///
/// Returns an error if the envelope reports success.
pub fn refused<T>(envelope: Envelope<T>) -> eyre::Result<ErrorBody> {
    if envelope.ok {
        return Err(eyre!("expected the engine to refuse the call"));
    }
    envelope
        .error
        .ok_or_else(|| eyre!("failed envelope carries no error"))
}
