//! Repository port for job boards.

use crate::engagement::domain::{Application, ApplicationId, Job, JobBoard, JobId};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for engagement repository operations.
pub type EngagementRepositoryResult<T> = Result<T, EngagementRepositoryError>;

/// Filter for application lookups; unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    /// Restrict to one job.
    pub job_id: Option<JobId>,
    /// Restrict to one tasker.
    pub tasker_id: Option<UserId>,
}

impl ApplicationQuery {
    /// Matches every application of `job_id`.
    #[must_use]
    pub const fn for_job(job_id: JobId) -> Self {
        Self {
            job_id: Some(job_id),
            tasker_id: None,
        }
    }

    /// Matches every application of `tasker_id`.
    #[must_use]
    pub const fn for_tasker(tasker_id: UserId) -> Self {
        Self {
            job_id: None,
            tasker_id: Some(tasker_id),
        }
    }

    /// Matches the applications of one `(job, tasker)` pair.
    #[must_use]
    pub const fn for_pair(job_id: JobId, tasker_id: UserId) -> Self {
        Self {
            job_id: Some(job_id),
            tasker_id: Some(tasker_id),
        }
    }

    /// Returns whether `application` satisfies the filter.
    #[must_use]
    pub fn matches(&self, application: &Application) -> bool {
        self.job_id.is_none_or(|job_id| application.job_id() == job_id)
            && self
                .tasker_id
                .is_none_or(|tasker_id| application.tasker_id() == tasker_id)
    }
}

/// Job board persistence contract.
///
/// Boards are written as a unit. [`EngagementRepository::save_board`]
/// succeeds only when the stored version still equals the version the board
/// was loaded at, which serialises concurrent transitions on one job.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Reserves a fresh job identifier.
    async fn next_job_id(&self) -> EngagementRepositoryResult<JobId>;

    /// Reserves a fresh application identifier.
    async fn next_application_id(&self) -> EngagementRepositoryResult<ApplicationId>;

    /// Stores a newly posted board.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementRepositoryError::DuplicateJob`] when the job
    /// identifier is already taken.
    async fn insert_board(&self, board: &JobBoard) -> EngagementRepositoryResult<()>;

    /// Persists every change made to a loaded board.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementRepositoryError::NotFound`] when the job no
    /// longer exists and [`EngagementRepositoryError::VersionConflict`] when
    /// another transition saved the board first.
    async fn save_board(&self, board: &JobBoard) -> EngagementRepositoryResult<()>;

    /// Removes a board loaded at `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementRepositoryError::NotFound`] or
    /// [`EngagementRepositoryError::VersionConflict`] as for saves.
    async fn delete_board(&self, job_id: JobId, expected_version: u64)
    -> EngagementRepositoryResult<()>;

    /// Loads a job together with its applications and cooldown anchors.
    ///
    /// Returns `None` when the job does not exist.
    async fn load_board(&self, job_id: JobId) -> EngagementRepositoryResult<Option<JobBoard>>;

    /// Finds the job owning an application.
    ///
    /// Returns `None` when the application does not exist.
    async fn find_job_of_application(
        &self,
        application_id: ApplicationId,
    ) -> EngagementRepositoryResult<Option<JobId>>;

    /// Returns the jobs posted by a customer, oldest first.
    async fn list_jobs_by_customer(
        &self,
        customer_id: UserId,
    ) -> EngagementRepositoryResult<Vec<Job>>;

    /// Returns applications matching `query`, ordered by identifier.
    async fn find_applications(
        &self,
        query: ApplicationQuery,
    ) -> EngagementRepositoryResult<Vec<Application>>;
}

/// Errors returned by engagement repository implementations.
#[derive(Debug, Clone, Error)]
pub enum EngagementRepositoryError {
    /// A job with the same identifier already exists.
    #[error("duplicate job identifier: {0}")]
    DuplicateJob(JobId),

    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// The board changed since it was loaded.
    #[error("job {job_id} was modified concurrently (expected version {expected})")]
    VersionConflict {
        /// Job identifier.
        job_id: JobId,
        /// Version the caller loaded.
        expected: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EngagementRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
