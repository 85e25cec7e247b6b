//! Errors surfaced by the rating service.

use crate::engagement::{domain::JobId, ports::EngagementRepositoryError};
use crate::rating::{
    domain::{RatingDomainError, ReviewId},
    ports::ReviewRepositoryError,
};
use thiserror::Error;

/// Service-level errors for review operations.
#[derive(Debug, Clone, Error)]
pub enum RatingServiceError {
    /// Rating rule violation.
    #[error(transparent)]
    Domain(#[from] RatingDomainError),

    /// Review persistence failed.
    #[error(transparent)]
    Repository(#[from] ReviewRepositoryError),

    /// Board lookup failed.
    #[error(transparent)]
    Engagement(#[from] EngagementRepositoryError),

    /// The job does not exist.
    #[error("job not found: {0}")]
    JobNotFound(JobId),

    /// The review does not exist.
    #[error("review not found: {0}")]
    ReviewNotFound(ReviewId),
}

/// Result type for rating service operations.
pub type RatingServiceResult<T> = Result<T, RatingServiceError>;
