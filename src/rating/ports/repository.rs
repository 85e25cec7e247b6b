//! Repository port for reviews.

use crate::engagement::domain::JobId;
use crate::identity::domain::UserId;
use crate::rating::domain::{Review, ReviewId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for review repository operations.
pub type ReviewRepositoryResult<T> = Result<T, ReviewRepositoryError>;

/// Review persistence contract.
///
/// Implementations enforce that at most one review exists per
/// `(job, rater, ratee)` triple and that the single edit is recorded at most
/// once, even under concurrent callers.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Reserves a fresh review identifier.
    async fn next_review_id(&self) -> ReviewRepositoryResult<ReviewId>;

    /// Stores a new review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::DuplicateReview`] when the triple
    /// already has a review.
    async fn store(&self, review: &Review) -> ReviewRepositoryResult<()>;

    /// Persists an edited review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::NotFound`] for unknown reviews and
    /// [`ReviewRepositoryError::EditConflict`] when the stored review was
    /// already edited.
    async fn save_edit(&self, review: &Review) -> ReviewRepositoryResult<()>;

    /// Finds a review by identifier.
    async fn find_by_id(&self, id: ReviewId) -> ReviewRepositoryResult<Option<Review>>;

    /// Returns the reviews of a job, ordered by identifier.
    async fn find_by_job(&self, job_id: JobId) -> ReviewRepositoryResult<Vec<Review>>;
}

/// Errors returned by review repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReviewRepositoryError {
    /// The triple already has a review.
    #[error("user {rater_id} already reviewed user {ratee_id} on job {job_id}")]
    DuplicateReview {
        /// Job reviewed.
        job_id: JobId,
        /// Reviewer.
        rater_id: UserId,
        /// Reviewed party.
        ratee_id: UserId,
    },

    /// The review was not found.
    #[error("review not found: {0}")]
    NotFound(ReviewId),

    /// The review's edit was already recorded.
    #[error("review {0} was edited concurrently")]
    EditConflict(ReviewId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReviewRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
