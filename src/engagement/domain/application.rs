//! Application lifecycle types.

use super::{ApplicationId, Budget, JobId, ParseApplicationStatusError};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single application instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted and awaiting the owner's decision.
    Pending,
    /// Hired by the owner.
    Accepted,
    /// Declined while pending, or terminated after hire.
    Rejected,
    /// Cancelled by the tasker while pending, or resigned after hire.
    Withdrawn,
}

impl ApplicationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Returns whether the application still occupies the tasker's slot on
    /// the job.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Returns whether the application can never change again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_live()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ApplicationStatus {
    type Error = ParseApplicationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(ParseApplicationStatusError(value.to_owned())),
        }
    }
}

/// Why a hired tasker's application was closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ClosingNote {
    /// Why the owner fired the tasker.
    TerminationReason(String),
    /// Why the tasker left the job.
    ResignationReason(String),
}

impl ClosingNote {
    /// Returns the note text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::TerminationReason(text) | Self::ResignationReason(text) => text,
        }
    }
}

/// How an application ended up, as shown on the job's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationOutcome {
    /// Awaiting a decision.
    Pending,
    /// Hired and still engaged.
    Active,
    /// Declined before being hired.
    Rejected,
    /// Hired, then terminated by the owner.
    Fired,
    /// Withdrawn by the tasker before being hired.
    Cancelled,
    /// Hired, then left the job.
    Resigned,
}

/// A tasker's bid to perform a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    id: ApplicationId,
    job_id: JobId,
    tasker_id: UserId,
    status: ApplicationStatus,
    cover_letter: Option<String>,
    closing_note: Option<ClosingNote>,
    proposed_budget: Option<Budget>,
    accepted_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedApplicationData {
    /// Persisted application identifier.
    pub id: ApplicationId,
    /// Job applied to.
    pub job_id: JobId,
    /// Applying tasker.
    pub tasker_id: UserId,
    /// Persisted status.
    pub status: ApplicationStatus,
    /// Cover letter sent with the application, if any.
    pub cover_letter: Option<String>,
    /// Termination or resignation reason, if any.
    pub closing_note: Option<ClosingNote>,
    /// Proposed budget, if any.
    pub proposed_budget: Option<Budget>,
    /// When the application was accepted, if ever.
    pub accepted_at: Option<DateTime<Utc>>,
    /// When the application reached a terminal status.
    pub closed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Creates a pending application.
    #[must_use]
    pub fn new(
        id: ApplicationId,
        job_id: JobId,
        tasker_id: UserId,
        cover_letter: Option<String>,
        proposed_budget: Option<Budget>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            job_id,
            tasker_id,
            status: ApplicationStatus::Pending,
            cover_letter: cover_letter.filter(|text| !text.trim().is_empty()),
            closing_note: None,
            proposed_budget,
            accepted_at: None,
            closed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an application from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedApplicationData) -> Self {
        Self {
            id: data.id,
            job_id: data.job_id,
            tasker_id: data.tasker_id,
            status: data.status,
            cover_letter: data.cover_letter,
            closing_note: data.closing_note,
            proposed_budget: data.proposed_budget,
            accepted_at: data.accepted_at,
            closed_at: data.closed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the application identifier.
    #[must_use]
    pub const fn id(&self) -> ApplicationId {
        self.id
    }

    /// Returns the job applied to.
    #[must_use]
    pub const fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Returns the applying tasker.
    #[must_use]
    pub const fn tasker_id(&self) -> UserId {
        self.tasker_id
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Returns the cover letter, if one was sent.
    #[must_use]
    pub fn cover_letter(&self) -> Option<&str> {
        self.cover_letter.as_deref()
    }

    /// Returns the termination or resignation reason, if any.
    #[must_use]
    pub const fn closing_note(&self) -> Option<&ClosingNote> {
        self.closing_note.as_ref()
    }

    /// Returns the proposed budget, if any.
    #[must_use]
    pub const fn proposed_budget(&self) -> Option<Budget> {
        self.proposed_budget
    }

    /// Returns when the application was accepted, if ever.
    #[must_use]
    pub const fn accepted_at(&self) -> Option<DateTime<Utc>> {
        self.accepted_at
    }

    /// Returns when the application reached a terminal status, if it has.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the tasker worked on the job at some point.
    #[must_use]
    pub const fn was_hired(&self) -> bool {
        self.accepted_at.is_some()
    }

    /// Classifies the application for roster display.
    ///
    /// Fired and resigned applications are told apart from plain rejections
    /// and cancellations by having been hired.
    #[must_use]
    pub const fn outcome(&self) -> ApplicationOutcome {
        match (self.status, self.was_hired()) {
            (ApplicationStatus::Pending, _) => ApplicationOutcome::Pending,
            (ApplicationStatus::Accepted, _) => ApplicationOutcome::Active,
            (ApplicationStatus::Rejected, true) => ApplicationOutcome::Fired,
            (ApplicationStatus::Rejected, false) => ApplicationOutcome::Rejected,
            (ApplicationStatus::Withdrawn, true) => ApplicationOutcome::Resigned,
            (ApplicationStatus::Withdrawn, false) => ApplicationOutcome::Cancelled,
        }
    }

    pub(crate) fn accept(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.status = ApplicationStatus::Accepted;
        self.accepted_at = Some(timestamp);
        self.updated_at = timestamp;
    }

    pub(crate) fn close(
        &mut self,
        status: ApplicationStatus,
        closing_note: Option<ClosingNote>,
        clock: &impl Clock,
    ) {
        let timestamp = clock.utc();
        self.status = status;
        self.closing_note = closing_note;
        self.closed_at = Some(timestamp);
        self.updated_at = timestamp;
    }
}
