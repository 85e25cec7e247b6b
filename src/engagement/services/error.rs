//! Service-level errors for engagement operations.

use crate::engagement::{
    domain::{ApplicationId, EngagementDomainError, JobId},
    ports::{EngagementRepositoryError, MatchScorerError},
};
use thiserror::Error;

/// Service-level errors for job and application lifecycle operations.
#[derive(Debug, Error)]
pub enum EngagementServiceError {
    /// A lifecycle guard rejected the operation.
    #[error(transparent)]
    Domain(#[from] EngagementDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] EngagementRepositoryError),
    /// The external scoring service failed.
    #[error(transparent)]
    Scorer(#[from] MatchScorerError),
    /// No job exists with the given identifier.
    #[error("job {0} not found")]
    JobNotFound(JobId),
    /// No application exists with the given identifier.
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
}

/// Result type for engagement service operations.
pub type EngagementServiceResult<T> = Result<T, EngagementServiceError>;
