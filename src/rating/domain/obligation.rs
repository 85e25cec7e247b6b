//! Who owes whom a review once a job is finished.

use super::{IneligibilityReason, RaterRole, RatingDomainError, Review, ReviewId};
use crate::engagement::domain::{JobBoard, JobId, JobStatus};
use crate::identity::domain::{Actor, Role, UserId};
use serde::{Deserialize, Serialize};

/// Decides on which side of the engagement `rater` may review `ratee_id`.
///
/// A customer reviews the taskers they still have hired. A tasker who worked
/// the job, including one who later resigned, reviews the customer.
///
/// # Errors
///
/// Returns [`RatingDomainError::NotEligible`] when the job is not finished or
/// the relationship does not permit the review.
pub fn establish_rater_role(
    board: &JobBoard,
    rater: Actor,
    ratee_id: UserId,
) -> Result<RaterRole, RatingDomainError> {
    let job = board.job();
    let refuse = |reason| RatingDomainError::NotEligible {
        job_id: job.id(),
        rater_id: rater.user_id(),
        ratee_id,
        reason,
    };

    if job.status() != JobStatus::Finished {
        return Err(refuse(IneligibilityReason::JobNotFinished));
    }

    match rater.role() {
        Role::Customer if rater.user_id() != job.customer_id() => {
            Err(refuse(IneligibilityReason::RaterNotEngaged))
        }
        Role::Customer if !board.is_hired(ratee_id) => {
            Err(refuse(IneligibilityReason::RateeNotHired))
        }
        Role::Customer => Ok(RaterRole::Customer),
        Role::Tasker if !board.has_worked(rater.user_id()) => {
            Err(refuse(IneligibilityReason::RaterNotEngaged))
        }
        Role::Tasker if ratee_id != job.customer_id() => {
            Err(refuse(IneligibilityReason::RateeNotCustomer))
        }
        Role::Tasker => Ok(RaterRole::Tasker),
        Role::Admin => Err(refuse(IneligibilityReason::RoleNotParticipating)),
    }
}

/// Review status between the customer and one tasker who worked the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskerObligation {
    /// The tasker.
    pub tasker_id: UserId,
    /// `false` when the tasker resigned; the customer owes them no review.
    pub hired: bool,
    /// The customer's review of this tasker.
    pub customer_review: Option<ReviewId>,
    /// This tasker's review of the customer.
    pub tasker_review: Option<ReviewId>,
}

impl TaskerObligation {
    /// Returns whether the customer still owes this tasker a review.
    #[must_use]
    pub const fn customer_owes_review(&self) -> bool {
        self.hired && self.customer_review.is_none()
    }

    /// Returns whether this tasker still owes the customer a review.
    #[must_use]
    pub const fn tasker_owes_review(&self) -> bool {
        self.tasker_review.is_none()
    }
}

/// Rating obligations of one job.
///
/// Obligations are inactive, and list no taskers, until the job finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingObligations {
    /// The job.
    pub job_id: JobId,
    /// The job's owner.
    pub customer_id: UserId,
    /// Whether the job is finished.
    pub active: bool,
    /// Every tasker who worked the job, ordered by identifier.
    pub taskers: Vec<TaskerObligation>,
}

impl RatingObligations {
    /// Derives the obligations from a board and the reviews recorded for it.
    #[must_use]
    pub fn compute(board: &JobBoard, reviews: &[Review]) -> Self {
        let job = board.job();
        let active = job.status() == JobStatus::Finished;
        let customer_id = job.customer_id();
        let review_between = |rater_id: UserId, ratee_id: UserId| {
            reviews
                .iter()
                .find(|review| review.rater_id() == rater_id && review.ratee_id() == ratee_id)
                .map(Review::id)
        };

        let mut taskers: Vec<TaskerObligation> = if active {
            board
                .hired_taskers()
                .into_iter()
                .map(|tasker_id| (tasker_id, true))
                .chain(board.resigned_taskers().into_iter().map(|tasker_id| (tasker_id, false)))
                .map(|(tasker_id, hired)| TaskerObligation {
                    tasker_id,
                    hired,
                    customer_review: review_between(customer_id, tasker_id),
                    tasker_review: review_between(tasker_id, customer_id),
                })
                .collect()
        } else {
            Vec::new()
        };
        taskers.sort_by_key(|obligation| obligation.tasker_id);

        Self {
            job_id: job.id(),
            customer_id,
            active,
            taskers,
        }
    }

    /// Returns whether the customer has reviewed every tasker still hired.
    ///
    /// Always `false` before the job finishes.
    #[must_use]
    pub fn all_customer_ratings_complete(&self) -> bool {
        self.active && !self.taskers.iter().any(TaskerObligation::customer_owes_review)
    }

    /// Returns the taskers the customer has yet to review.
    #[must_use]
    pub fn outstanding_customer_reviews(&self) -> Vec<UserId> {
        self.taskers
            .iter()
            .filter(|obligation| obligation.customer_owes_review())
            .map(|obligation| obligation.tasker_id)
            .collect()
    }

    /// Returns the taskers who have yet to review the customer.
    #[must_use]
    pub fn outstanding_tasker_reviews(&self) -> Vec<UserId> {
        self.taskers
            .iter()
            .filter(|obligation| obligation.tasker_owes_review())
            .map(|obligation| obligation.tasker_id)
            .collect()
    }

    /// Returns whether `tasker_id` has reviewed the customer.
    #[must_use]
    pub fn tasker_has_rated_customer(&self, tasker_id: UserId) -> bool {
        self.taskers.iter().any(|obligation| {
            obligation.tasker_id == tasker_id && obligation.tasker_review.is_some()
        })
    }
}
