//! Review aggregate and its single-edit rule.

use super::{ParseRaterRoleError, RatingDomainError};
use crate::engagement::domain::JobId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate review identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(i64);

impl ReviewId {
    /// Wraps a stored identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validates a star rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingDomainError::InvalidRating`] outside `1..=5`.
    pub const fn new(value: u8) -> Result<Self, RatingDomainError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(RatingDomainError::InvalidRating(value))
        }
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Side of the engagement the reviewer was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaterRole {
    /// The job owner reviewing a hired tasker.
    Customer,
    /// A tasker reviewing the job owner.
    Tasker,
}

impl RaterRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Tasker => "tasker",
        }
    }
}

impl fmt::Display for RaterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RaterRole {
    type Error = ParseRaterRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "tasker" => Ok(Self::Tasker),
            _ => Err(ParseRaterRoleError(value.to_owned())),
        }
    }
}

/// One party's review of the other after a finished job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    id: ReviewId,
    job_id: JobId,
    rater_id: UserId,
    ratee_id: UserId,
    rater_role: RaterRole,
    rating: Rating,
    comment: Option<String>,
    edited: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReviewData {
    /// Review identifier.
    pub id: ReviewId,
    /// Job reviewed.
    pub job_id: JobId,
    /// Reviewer.
    pub rater_id: UserId,
    /// Reviewed party.
    pub ratee_id: UserId,
    /// Reviewer's side of the engagement.
    pub rater_role: RaterRole,
    /// Star rating.
    pub rating: Rating,
    /// Optional free text.
    pub comment: Option<String>,
    /// Whether the single edit has been used.
    pub edited: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated content of a review about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Job reviewed.
    pub job_id: JobId,
    /// Reviewer.
    pub rater_id: UserId,
    /// Reviewed party.
    pub ratee_id: UserId,
    /// Reviewer's side of the engagement.
    pub rater_role: RaterRole,
    /// Star rating.
    pub rating: Rating,
    /// Optional free text; blank comments are dropped.
    pub comment: Option<String>,
}

fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

impl Review {
    /// Creates a new, unedited review from a draft.
    #[must_use]
    pub fn new(id: ReviewId, draft: ReviewDraft, clock: &impl Clock) -> Self {
        let now = clock.utc();
        Self {
            id,
            job_id: draft.job_id,
            rater_id: draft.rater_id,
            ratee_id: draft.ratee_id,
            rater_role: draft.rater_role,
            rating: draft.rating,
            comment: normalize_comment(draft.comment),
            edited: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a review from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReviewData) -> Self {
        Self {
            id: data.id,
            job_id: data.job_id,
            rater_id: data.rater_id,
            ratee_id: data.ratee_id,
            rater_role: data.rater_role,
            rating: data.rating,
            comment: data.comment,
            edited: data.edited,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the review identifier.
    #[must_use]
    pub const fn id(&self) -> ReviewId {
        self.id
    }

    /// Returns the reviewed job.
    #[must_use]
    pub const fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Returns the reviewer.
    #[must_use]
    pub const fn rater_id(&self) -> UserId {
        self.rater_id
    }

    /// Returns the reviewed party.
    #[must_use]
    pub const fn ratee_id(&self) -> UserId {
        self.ratee_id
    }

    /// Returns the reviewer's side of the engagement.
    #[must_use]
    pub const fn rater_role(&self) -> RaterRole {
        self.rater_role
    }

    /// Returns the star rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns whether the single edit has been used.
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.edited
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the rating and comment, consuming the single edit.
    ///
    /// # Errors
    ///
    /// Returns [`RatingDomainError::AlreadyEdited`] when the review was
    /// edited before.
    pub fn edit(
        &mut self,
        rating: Rating,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), RatingDomainError> {
        if self.edited {
            return Err(RatingDomainError::AlreadyEdited(self.id));
        }
        self.rating = rating;
        self.comment = normalize_comment(comment);
        self.edited = true;
        self.updated_at = clock.utc();
        Ok(())
    }
}
