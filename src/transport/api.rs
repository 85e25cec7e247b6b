//! Caller-facing facade over the engine services.

use super::{
    ApplicationPatch, Envelope, ErrorBody, ErrorCode, NewApplication, NewJob, NewReview,
    ReviewPatch,
};
use crate::engagement::{
    domain::{Application, ApplicationId, Job, JobId, ReapplicationStatus},
    ports::{ApplicationQuery, EngagementRepository, MatchScore, MatchScorer},
    services::{ApplicationLifecycleService, JobLifecycleService, MatchRankingService},
};
use crate::events::ports::EventPublisher;
use crate::identity::{
    domain::{Actor, SessionToken},
    ports::IdentityResolver,
};
use crate::rating::{
    domain::{RatingObligations, Review, ReviewId},
    ports::ReviewRepository,
    services::RatingService,
};
use mockable::Clock;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Engine operations keyed by session token and answered with an
/// [`Envelope`].
pub struct EngagementApi<I, R, V, P, S, C>
where
    I: IdentityResolver,
    R: EngagementRepository,
    V: ReviewRepository,
    P: EventPublisher,
    S: MatchScorer,
    C: Clock + Send + Sync,
{
    identity: Arc<I>,
    jobs: JobLifecycleService<R, P, C>,
    applications: ApplicationLifecycleService<R, P, C>,
    ratings: RatingService<R, V, P, C>,
    ranking: MatchRankingService<R, S>,
}

fn report<E>(operation: &'static str, err: E) -> ErrorBody
where
    E: Into<ErrorBody> + Display,
{
    let message = err.to_string();
    let body = err.into();
    if body.code == ErrorCode::Internal {
        warn!(operation, error = %message, "engine call failed");
    } else {
        debug!(operation, code = %body.code, error = %message, "engine call refused");
    }
    body
}

fn respond<T, E>(operation: &'static str, result: Result<T, E>) -> Envelope<T>
where
    E: Into<ErrorBody> + Display,
{
    match result {
        Ok(data) => Envelope::success(data),
        Err(err) => Envelope::failure(report(operation, err)),
    }
}

impl<I, R, V, P, S, C> EngagementApi<I, R, V, P, S, C>
where
    I: IdentityResolver,
    R: EngagementRepository,
    V: ReviewRepository,
    P: EventPublisher,
    S: MatchScorer,
    C: Clock + Send + Sync,
{
    /// Creates the facade from its services.
    #[must_use]
    pub const fn new(
        identity: Arc<I>,
        jobs: JobLifecycleService<R, P, C>,
        applications: ApplicationLifecycleService<R, P, C>,
        ratings: RatingService<R, V, P, C>,
        ranking: MatchRankingService<R, S>,
    ) -> Self {
        Self {
            identity,
            jobs,
            applications,
            ratings,
            ranking,
        }
    }

    async fn caller(&self, token: &SessionToken) -> Result<Actor, ErrorBody> {
        self.identity
            .resolve(token)
            .await
            .map_err(|err| report("resolve_session", err))
    }

    /// `POST /jobs`.
    pub async fn create_job(&self, token: &SessionToken, body: NewJob) -> Envelope<Job> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond("create_job", self.jobs.create_job(actor, body.into()).await)
    }

    /// `POST /jobs/{id}/start`.
    pub async fn start_job(&self, token: &SessionToken, job_id: JobId) -> Envelope<Job> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond("start_job", self.jobs.start_job(job_id, actor).await)
    }

    /// `POST /jobs/{id}/finish`.
    pub async fn finish_job(&self, token: &SessionToken, job_id: JobId) -> Envelope<Job> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond("finish_job", self.jobs.finish_job(job_id, actor).await)
    }

    /// `POST /jobs/{id}/cancel`.
    pub async fn cancel_job(&self, token: &SessionToken, job_id: JobId) -> Envelope<Job> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond("cancel_job", self.jobs.cancel_job(job_id, actor).await)
    }

    /// `POST /applications`.
    pub async fn create_application(
        &self,
        token: &SessionToken,
        body: NewApplication,
    ) -> Envelope<Application> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond(
            "create_application",
            self.applications.apply(actor, body.into()).await,
        )
    }

    /// `PATCH /applications/{id}`.
    pub async fn patch_application(
        &self,
        token: &SessionToken,
        application_id: ApplicationId,
        body: ApplicationPatch,
    ) -> Envelope<Application> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond(
            "patch_application",
            self.applications
                .transition(actor, body.into_request(application_id))
                .await,
        )
    }

    /// `GET /applications?jobId=&taskerId=`.
    pub async fn list_applications(
        &self,
        token: &SessionToken,
        query: ApplicationQuery,
    ) -> Envelope<Vec<Application>> {
        if let Err(err) = self.caller(token).await {
            return Envelope::failure(err);
        }
        respond(
            "list_applications",
            self.applications.find_applications(query).await,
        )
    }

    /// Whether the calling tasker may apply to a job now, with the seconds
    /// left on any cooldown.
    pub async fn reapplication_status(
        &self,
        token: &SessionToken,
        job_id: JobId,
    ) -> Envelope<ReapplicationStatus> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond(
            "reapplication_status",
            self.applications
                .reapplication_status(job_id, actor.user_id())
                .await,
        )
    }

    /// `POST /reviews`.
    pub async fn submit_review(&self, token: &SessionToken, body: NewReview) -> Envelope<Review> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond(
            "submit_review",
            self.ratings.submit_review(actor, body.into()).await,
        )
    }

    /// `PATCH /reviews/{id}`.
    pub async fn edit_review(
        &self,
        token: &SessionToken,
        review_id: ReviewId,
        body: ReviewPatch,
    ) -> Envelope<Review> {
        let actor = match self.caller(token).await {
            Ok(actor) => actor,
            Err(err) => return Envelope::failure(err),
        };
        respond(
            "edit_review",
            self.ratings
                .edit_review(actor, body.into_request(review_id))
                .await,
        )
    }

    /// Who still owes whom a review on a job.
    pub async fn rating_obligations(
        &self,
        token: &SessionToken,
        job_id: JobId,
    ) -> Envelope<RatingObligations> {
        if let Err(err) = self.caller(token).await {
            return Envelope::failure(err);
        }
        respond("rating_obligations", self.ratings.obligations(job_id).await)
    }

    /// `GET /jobs/{id}/matches`.
    pub async fn job_matches(
        &self,
        token: &SessionToken,
        job_id: JobId,
    ) -> Envelope<Vec<MatchScore>> {
        if let Err(err) = self.caller(token).await {
            return Envelope::failure(err);
        }
        respond("job_matches", self.ranking.matches(job_id).await)
    }
}
