//! Error types for job and application lifecycle validation.

use super::{ApplicationId, ApplicationStatus, JobId, JobStatus, LifecycleAction};
use crate::identity::domain::{Actor, UserId};
use thiserror::Error;

/// Errors returned when a lifecycle guard rejects an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngagementDomainError {
    /// The caller's role or ownership does not permit the action.
    #[error("{actor} is not permitted to {action} on job {job_id}")]
    Forbidden {
        /// Job the action targeted.
        job_id: JobId,
        /// Caller that attempted the action.
        actor: Actor,
        /// Attempted action.
        action: LifecycleAction,
    },

    /// The job's current status does not permit the action.
    #[error("cannot {action} job {job_id} while it is {status}")]
    InvalidJobTransition {
        /// Job identifier.
        job_id: JobId,
        /// Current job status.
        status: JobStatus,
        /// Attempted action.
        action: LifecycleAction,
    },

    /// Starting a job requires at least one hired tasker.
    #[error("job {0} cannot start without an accepted application")]
    NoAcceptedApplication(JobId),

    /// Deleting a job is not possible once a tasker has been hired.
    #[error("job {0} cannot be deleted after an application was accepted")]
    HiringStarted(JobId),

    /// The application and job statuses do not permit the action.
    #[error("cannot {action} application {application_id}: it is {status}, job is {job_status}")]
    InvalidApplicationTransition {
        /// Application identifier.
        application_id: ApplicationId,
        /// Current application status.
        status: ApplicationStatus,
        /// Current status of the owning job.
        job_status: JobStatus,
        /// Attempted action.
        action: LifecycleAction,
    },

    /// The tasker already holds a pending or accepted application.
    #[error("tasker {tasker_id} already has live application {application_id} for job {job_id}")]
    LiveApplicationExists {
        /// Job identifier.
        job_id: JobId,
        /// Tasker identifier.
        tasker_id: UserId,
        /// The live application blocking reapplication.
        application_id: ApplicationId,
    },

    /// The tasker recently withdrew a pending application for this job.
    #[error(
        "reapplication to job {job_id} is blocked: cooldown remaining: {} minutes",
        .remaining_seconds.div_ceil(60)
    )]
    CooldownActive {
        /// Job identifier.
        job_id: JobId,
        /// Tasker identifier.
        tasker_id: UserId,
        /// Whole seconds until reapplication is allowed.
        remaining_seconds: u64,
    },

    /// Termination and resignation must carry a reason.
    #[error("a non-empty reason is required to {0}")]
    MissingReason(LifecycleAction),

    /// Job titles must not be blank.
    #[error("job title must not be empty")]
    EmptyTitle,

    /// The referenced application does not belong to the job board.
    #[error("application {application_id} does not exist on job {job_id}")]
    UnknownApplication {
        /// Job identifier.
        job_id: JobId,
        /// Missing application identifier.
        application_id: ApplicationId,
    },
}

/// Error returned while parsing job statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);

/// Error returned while parsing application statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown application status: {0}")]
pub struct ParseApplicationStatusError(pub String);
