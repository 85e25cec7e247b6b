//! Service layer for submitting, editing and tracking reviews.

use super::{RatingServiceError, RatingServiceResult};
use crate::engagement::{
    domain::{JobBoard, JobId},
    ports::EngagementRepository,
};
use crate::events::{
    domain::{DomainEvent, EventPayload},
    ports::EventPublisher,
};
use crate::identity::domain::{Actor, UserId};
use crate::rating::{
    domain::{
        Rating, RatingDomainError, RatingObligations, Review, ReviewDraft, ReviewId,
        establish_rater_role,
    },
    ports::{ReviewRepository, ReviewRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request payload for a new review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReviewRequest {
    job_id: JobId,
    ratee_id: UserId,
    rating: u8,
    comment: Option<String>,
}

impl SubmitReviewRequest {
    /// Creates a request to rate `ratee_id` on `job_id` with `rating` stars.
    #[must_use]
    pub const fn new(job_id: JobId, ratee_id: UserId, rating: u8) -> Self {
        Self {
            job_id,
            ratee_id,
            rating,
            comment: None,
        }
    }

    /// Attaches a free-text comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Request payload for a review's single edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditReviewRequest {
    review_id: ReviewId,
    rating: u8,
    comment: Option<String>,
}

impl EditReviewRequest {
    /// Creates a request replacing the rating of `review_id`.
    #[must_use]
    pub const fn new(review_id: ReviewId, rating: u8) -> Self {
        Self {
            review_id,
            rating,
            comment: None,
        }
    }

    /// Replaces the comment as well; omitting it clears the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Rating obligation orchestration service.
#[derive(Clone)]
pub struct RatingService<E, V, P, C>
where
    E: EngagementRepository,
    V: ReviewRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    boards: Arc<E>,
    reviews: Arc<V>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<E, V, P, C> RatingService<E, V, P, C>
where
    E: EngagementRepository,
    V: ReviewRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new rating service.
    #[must_use]
    pub const fn new(boards: Arc<E>, reviews: Arc<V>, publisher: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            boards,
            reviews,
            publisher,
            clock,
        }
    }

    /// Records the caller's review of `ratee_id` on a finished job.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::JobNotFound`] for unknown jobs,
    /// [`RatingDomainError::InvalidRating`] for ratings outside 1 to 5,
    /// [`RatingDomainError::NotEligible`] when the relationship does not
    /// permit the review and [`RatingDomainError::AlreadyReviewed`] when the
    /// caller already reviewed this party on this job.
    pub async fn submit_review(
        &self,
        actor: Actor,
        request: SubmitReviewRequest,
    ) -> RatingServiceResult<Review> {
        let SubmitReviewRequest {
            job_id,
            ratee_id,
            rating: stars,
            comment,
        } = request;
        let board = self.load_board(job_id).await?;
        let rating = Rating::new(stars)?;
        let rater_role = establish_rater_role(&board, actor, ratee_id)
            .inspect_err(|err| debug!(%job_id, %actor, %ratee_id, %err, "review rejected"))?;

        let review_id = self.reviews.next_review_id().await?;
        let review = Review::new(
            review_id,
            ReviewDraft {
                job_id,
                rater_id: actor.user_id(),
                ratee_id,
                rater_role,
                rating,
                comment,
            },
            &*self.clock,
        );
        self.reviews.store(&review).await.map_err(|err| match err {
            ReviewRepositoryError::DuplicateReview {
                job_id: duplicate_job,
                rater_id,
                ratee_id: duplicate_ratee,
            } => RatingServiceError::Domain(RatingDomainError::AlreadyReviewed {
                job_id: duplicate_job,
                rater_id,
                ratee_id: duplicate_ratee,
            }),
            other => RatingServiceError::Repository(other),
        })?;

        self.publish(EventPayload::ReviewSubmitted {
            review_id,
            job_id,
            rater_id: actor.user_id(),
            ratee_id,
            rating,
        })
        .await;
        info!(%review_id, %job_id, %actor, %ratee_id, %rating, "review submitted");
        Ok(review)
    }

    /// Applies the single permitted edit to the caller's review.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::ReviewNotFound`] for unknown reviews,
    /// [`RatingDomainError::NotAuthor`] when the caller did not write the
    /// review, [`RatingDomainError::InvalidRating`] for ratings outside 1 to 5
    /// and [`RatingDomainError::AlreadyEdited`] on a second edit.
    pub async fn edit_review(
        &self,
        actor: Actor,
        request: EditReviewRequest,
    ) -> RatingServiceResult<Review> {
        let EditReviewRequest {
            review_id,
            rating: stars,
            comment,
        } = request;
        let mut review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or(RatingServiceError::ReviewNotFound(review_id))?;
        if review.rater_id() != actor.user_id() {
            return Err(RatingDomainError::NotAuthor { review_id, actor }.into());
        }
        let rating = Rating::new(stars)?;
        review
            .edit(rating, comment, &*self.clock)
            .inspect_err(|err| debug!(%review_id, %actor, %err, "review edit rejected"))?;

        self.reviews.save_edit(&review).await.map_err(|err| match err {
            ReviewRepositoryError::EditConflict(conflicting) => {
                RatingServiceError::Domain(RatingDomainError::AlreadyEdited(conflicting))
            }
            other => RatingServiceError::Repository(other),
        })?;

        self.publish(EventPayload::ReviewEdited {
            review_id,
            job_id: review.job_id(),
            rating,
        })
        .await;
        info!(%review_id, %actor, %rating, "review edited");
        Ok(review)
    }

    /// Returns who owes whom a review on a job.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::JobNotFound`] for unknown jobs and
    /// repository errors.
    pub async fn obligations(&self, job_id: JobId) -> RatingServiceResult<RatingObligations> {
        let board = self.load_board(job_id).await?;
        let reviews = self.reviews.find_by_job(job_id).await?;
        Ok(RatingObligations::compute(&board, &reviews))
    }

    /// Returns whether the customer has reviewed every tasker still hired on
    /// a finished job.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::JobNotFound`] for unknown jobs and
    /// repository errors.
    pub async fn all_customer_ratings_complete(&self, job_id: JobId) -> RatingServiceResult<bool> {
        Ok(self.obligations(job_id).await?.all_customer_ratings_complete())
    }

    /// Returns whether `tasker_id` has reviewed the customer of a job.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::JobNotFound`] for unknown jobs and
    /// repository errors.
    pub async fn tasker_has_rated_customer(
        &self,
        job_id: JobId,
        tasker_id: UserId,
    ) -> RatingServiceResult<bool> {
        Ok(self
            .obligations(job_id)
            .await?
            .tasker_has_rated_customer(tasker_id))
    }

    /// Returns every review recorded for a job.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::JobNotFound`] for unknown jobs and
    /// repository errors.
    pub async fn reviews_for_job(&self, job_id: JobId) -> RatingServiceResult<Vec<Review>> {
        self.load_board(job_id).await?;
        Ok(self.reviews.find_by_job(job_id).await?)
    }

    /// Retrieves a review by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RatingServiceError::Repository`] when the lookup fails.
    pub async fn find_review(&self, review_id: ReviewId) -> RatingServiceResult<Option<Review>> {
        Ok(self.reviews.find_by_id(review_id).await?)
    }

    async fn load_board(&self, job_id: JobId) -> RatingServiceResult<JobBoard> {
        self.boards
            .load_board(job_id)
            .await?
            .ok_or(RatingServiceError::JobNotFound(job_id))
    }

    async fn publish(&self, payload: EventPayload) {
        let event = DomainEvent::new(payload, &*self.clock);
        if let Err(err) = self.publisher.publish(std::slice::from_ref(&event)).await {
            warn!(event_type = event.event_type(), %err, "failed to publish domain event");
        }
    }
}
