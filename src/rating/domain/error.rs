//! Error types for review validation.

use super::ReviewId;
use crate::engagement::domain::JobId;
use crate::identity::domain::{Actor, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a rater may not review a ratee on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// Reviews open only once the job is finished.
    JobNotFinished,
    /// The ratee is not a tasker the customer still has hired.
    RateeNotHired,
    /// The rater never worked the job.
    RaterNotEngaged,
    /// Taskers may only review the job's customer.
    RateeNotCustomer,
    /// Admins do not take part in rating obligations.
    RoleNotParticipating,
}

impl IneligibilityReason {
    /// Returns the human-readable explanation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobNotFinished => "the job is not finished",
            Self::RateeNotHired => "the ratee is not a hired tasker on this job",
            Self::RaterNotEngaged => "the rater did not work on this job",
            Self::RateeNotCustomer => "taskers can only review the job's customer",
            Self::RoleNotParticipating => "only customers and taskers submit reviews",
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned when a review operation violates the rating rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingDomainError {
    /// Star ratings run from 1 to 5.
    #[error("rating {0} is out of range, expected 1 to 5")]
    InvalidRating(u8),

    /// The rater-ratee relationship does not permit a review.
    #[error("user {rater_id} may not review user {ratee_id} on job {job_id}: {reason}")]
    NotEligible {
        /// Job reviewed.
        job_id: JobId,
        /// Would-be reviewer.
        rater_id: UserId,
        /// Would-be reviewed party.
        ratee_id: UserId,
        /// Why the review is refused.
        reason: IneligibilityReason,
    },

    /// A review for the same job, rater and ratee already exists.
    #[error("user {rater_id} already reviewed user {ratee_id} on job {job_id}")]
    AlreadyReviewed {
        /// Job reviewed.
        job_id: JobId,
        /// Reviewer.
        rater_id: UserId,
        /// Reviewed party.
        ratee_id: UserId,
    },

    /// The review's single permitted edit has been used.
    #[error("review {0} has already been edited")]
    AlreadyEdited(ReviewId),

    /// Only the author may edit a review.
    #[error("{actor} is not the author of review {review_id}")]
    NotAuthor {
        /// Review identifier.
        review_id: ReviewId,
        /// Caller that attempted the edit.
        actor: Actor,
    },
}

/// Error returned while parsing rater roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown rater role: {0}")]
pub struct ParseRaterRoleError(pub String);
