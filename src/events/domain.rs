//! Domain event envelope and payloads.

use crate::engagement::domain::{ApplicationId, JobId};
use crate::identity::domain::UserId;
use crate::rating::domain::{Rating, ReviewId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lifecycle change ready to be relayed to interested parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    id: Uuid,
    occurred_at: DateTime<Utc>,
    payload: EventPayload,
}

impl DomainEvent {
    /// Creates an event stamped with the current clock time.
    #[must_use]
    pub fn new(payload: EventPayload, clock: &impl Clock) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: clock.utc(),
            payload,
        }
    }

    /// Returns the unique event identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns when the change happened.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the event payload.
    #[must_use]
    pub const fn payload(&self) -> &EventPayload {
        &self.payload
    }

    /// Returns the stable event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EventPayload {
    /// A customer posted a job.
    JobPosted {
        /// Job identifier.
        job_id: JobId,
        /// Owning customer.
        customer_id: UserId,
    },
    /// The owner changed an open job's details.
    JobEdited {
        /// Job identifier.
        job_id: JobId,
    },
    /// The owner removed an open job.
    JobDeleted {
        /// Job identifier.
        job_id: JobId,
    },
    /// Work began with the hired taskers.
    JobStarted {
        /// Job identifier.
        job_id: JobId,
        /// Taskers with accepted applications.
        hired: Vec<UserId>,
    },
    /// Work was completed.
    JobFinished {
        /// Job identifier.
        job_id: JobId,
    },
    /// The job was called off.
    JobCancelled {
        /// Job identifier.
        job_id: JobId,
    },
    /// The customer and taskers now owe each other reviews.
    RatingObligationsOpened {
        /// Job identifier.
        job_id: JobId,
        /// Customer who owes reviews of the hired taskers.
        customer_id: UserId,
        /// Taskers the customer must rate.
        hired: Vec<UserId>,
        /// Taskers who resigned but may still rate the customer.
        resigned: Vec<UserId>,
    },
    /// A tasker applied.
    ApplicationSubmitted {
        /// Job identifier.
        job_id: JobId,
        /// New application.
        application_id: ApplicationId,
        /// Applying tasker.
        tasker_id: UserId,
    },
    /// The owner hired a tasker.
    ApplicationAccepted {
        /// Job identifier.
        job_id: JobId,
        /// Accepted application.
        application_id: ApplicationId,
        /// Hired tasker.
        tasker_id: UserId,
    },
    /// The owner declined a pending application.
    ApplicationRejected {
        /// Job identifier.
        job_id: JobId,
        /// Rejected application.
        application_id: ApplicationId,
        /// Declined tasker.
        tasker_id: UserId,
    },
    /// A tasker withdrew a pending application.
    ApplicationWithdrawn {
        /// Job identifier.
        job_id: JobId,
        /// Withdrawn application.
        application_id: ApplicationId,
        /// Withdrawing tasker.
        tasker_id: UserId,
        /// Earliest time the tasker may apply again.
        reapply_after: DateTime<Utc>,
    },
    /// The owner fired a hired tasker.
    TaskerTerminated {
        /// Job identifier.
        job_id: JobId,
        /// Terminated application.
        application_id: ApplicationId,
        /// Fired tasker.
        tasker_id: UserId,
        /// Owner's stated reason.
        reason: String,
    },
    /// A hired tasker left the job.
    TaskerResigned {
        /// Job identifier.
        job_id: JobId,
        /// Resigned application.
        application_id: ApplicationId,
        /// Resigning tasker.
        tasker_id: UserId,
        /// Tasker's stated reason.
        reason: String,
    },
    /// A review was recorded.
    ReviewSubmitted {
        /// Review identifier.
        review_id: ReviewId,
        /// Job reviewed.
        job_id: JobId,
        /// Reviewer.
        rater_id: UserId,
        /// Reviewed party.
        ratee_id: UserId,
        /// Star rating.
        rating: Rating,
    },
    /// A review used its single permitted edit.
    ReviewEdited {
        /// Review identifier.
        review_id: ReviewId,
        /// Job reviewed.
        job_id: JobId,
        /// New star rating.
        rating: Rating,
    },
}

impl EventPayload {
    /// Returns the stable event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::JobPosted { .. } => "job_posted",
            Self::JobEdited { .. } => "job_edited",
            Self::JobDeleted { .. } => "job_deleted",
            Self::JobStarted { .. } => "job_started",
            Self::JobFinished { .. } => "job_finished",
            Self::JobCancelled { .. } => "job_cancelled",
            Self::RatingObligationsOpened { .. } => "rating_obligations_opened",
            Self::ApplicationSubmitted { .. } => "application_submitted",
            Self::ApplicationAccepted { .. } => "application_accepted",
            Self::ApplicationRejected { .. } => "application_rejected",
            Self::ApplicationWithdrawn { .. } => "application_withdrawn",
            Self::TaskerTerminated { .. } => "tasker_terminated",
            Self::TaskerResigned { .. } => "tasker_resigned",
            Self::ReviewSubmitted { .. } => "review_submitted",
            Self::ReviewEdited { .. } => "review_edited",
        }
    }
}
