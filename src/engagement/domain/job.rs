//! Job aggregate member and its status state machine.

use super::{EngagementDomainError, JobId, LifecycleAction, ParseJobStatusError};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepting applications; hiring in progress.
    Open,
    /// Work has started with the hired taskers.
    InProgress,
    /// Work is complete; rating obligations are active.
    Finished,
    /// The job was called off.
    Cancelled,
}

impl JobStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::Finished | Self::Cancelled)
        )
    }

    /// Returns whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = ParseJobStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "finished" => Ok(Self::Finished),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseJobStatusError(value.to_owned())),
        }
    }
}

/// Monetary amount in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(u64);

impl Budget {
    /// Creates a budget from minor currency units.
    #[must_use]
    pub const fn from_minor_units(value: u64) -> Self {
        Self(value)
    }

    /// Returns the amount in minor currency units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }
}

/// Editable description of the work being offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    title: String,
    description: Option<String>,
    budget: Option<Budget>,
    required_skills: Vec<String>,
}

impl JobDetails {
    /// Creates job details with a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::EmptyTitle`] when the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, EngagementDomainError> {
        let raw = title.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EngagementDomainError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: None,
            budget: None,
            required_skills: Vec::new(),
        })
    }

    /// Sets the job description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the offered budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Sets the required skills, dropping blanks and duplicates.
    #[must_use]
    pub fn with_required_skills(mut self, skills: impl IntoIterator<Item = String>) -> Self {
        let mut normalized: Vec<String> = Vec::new();
        for skill in skills {
            let trimmed = skill.trim();
            if !trimmed.is_empty() && !normalized.iter().any(|known| known == trimmed) {
                normalized.push(trimmed.to_owned());
            }
        }
        self.required_skills = normalized;
        self
    }

    /// Returns the job title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the offered budget, if any.
    #[must_use]
    pub const fn budget(&self) -> Option<Budget> {
        self.budget
    }

    /// Returns the required skills.
    #[must_use]
    pub fn required_skills(&self) -> &[String] {
        &self.required_skills
    }
}

/// A job posted by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    id: JobId,
    customer_id: UserId,
    details: JobDetails,
    status: JobStatus,
    applications_count: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedJobData {
    /// Persisted job identifier.
    pub id: JobId,
    /// Owning customer.
    pub customer_id: UserId,
    /// Persisted details.
    pub details: JobDetails,
    /// Persisted status.
    pub status: JobStatus,
    /// Cached number of applications submitted.
    pub applications_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates an open job owned by `customer_id`.
    #[must_use]
    pub fn new(id: JobId, customer_id: UserId, details: JobDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            customer_id,
            details,
            status: JobStatus::Open,
            applications_count: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a job from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedJobData) -> Self {
        Self {
            id: data.id,
            customer_id: data.customer_id,
            details: data.details,
            status: data.status,
            applications_count: data.applications_count,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the owning customer.
    #[must_use]
    pub const fn customer_id(&self) -> UserId {
        self.customer_id
    }

    /// Returns the job details.
    #[must_use]
    pub const fn details(&self) -> &JobDetails {
        &self.details
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the number of applications submitted against the job.
    #[must_use]
    pub const fn applications_count(&self) -> u32 {
        self.applications_count
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

    /// Moves the job to `target` when the state machine allows it.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::InvalidJobTransition`] for any edge
    /// not in the job state machine.
    pub fn transition_to(
        &mut self,
        target: JobStatus,
        action: LifecycleAction,
        clock: &impl Clock,
    ) -> Result<(), EngagementDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(EngagementDomainError::InvalidJobTransition {
                job_id: self.id,
                status: self.status,
                action,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the job details.
    pub(crate) fn replace_details(&mut self, details: JobDetails, clock: &impl Clock) {
        self.details = details;
        self.touch(clock);
    }

    /// Counts one more submitted application.
    pub(crate) const fn record_application(&mut self) {
        self.applications_count = self.applications_count.saturating_add(1);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
