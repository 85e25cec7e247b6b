//! Stable error codes shown to callers.

use crate::engagement::{
    domain::EngagementDomainError, ports::EngagementRepositoryError,
    services::EngagementServiceError,
};
use crate::identity::ports::IdentityError;
use crate::rating::{
    domain::RatingDomainError, ports::ReviewRepositoryError, services::RatingServiceError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Wrong role, or not the owner or author.
    Forbidden,
    /// State machine violation.
    InvalidTransition,
    /// Reapplying inside the cooldown window.
    CooldownActive,
    /// A review for the triple already exists.
    AlreadyReviewed,
    /// The review's single edit has been used.
    AlreadyEdited,
    /// The rating relationship does not exist.
    NotEligible,
    /// A referenced job, application or review is missing.
    NotFound,
    /// A malformed request value.
    InvalidInput,
    /// Another caller changed the job first; reload and retry.
    Conflict,
    /// The session is unknown.
    Unauthenticated,
    /// An infrastructure fault.
    Internal,
}

impl ErrorCode {
    /// Returns the wire name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forbidden => "Forbidden",
            Self::InvalidTransition => "InvalidTransition",
            Self::CooldownActive => "CooldownActive",
            Self::AlreadyReviewed => "AlreadyReviewed",
            Self::AlreadyEdited => "AlreadyEdited",
            Self::NotEligible => "NotEligible",
            Self::NotFound => "NotFound",
            Self::InvalidInput => "InvalidInput",
            Self::Conflict => "Conflict",
            Self::Unauthenticated => "Unauthenticated",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure half of the [`super::Envelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Failure category.
    pub code: ErrorCode,
    /// Human-readable reason.
    pub message: String,
    /// Seconds left on an active cooldown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_remaining_seconds: Option<u64>,
}

impl ErrorBody {
    /// Creates an error body.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cooldown_remaining_seconds: None,
        }
    }

    /// Creates the body reported for infrastructure faults.
    ///
    /// Fault details stay in the logs.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(ErrorCode::Internal, "internal error")
    }
}

impl From<&EngagementDomainError> for ErrorBody {
    fn from(err: &EngagementDomainError) -> Self {
        let code = match err {
            EngagementDomainError::Forbidden { .. } => ErrorCode::Forbidden,
            EngagementDomainError::InvalidJobTransition { .. }
            | EngagementDomainError::NoAcceptedApplication(_)
            | EngagementDomainError::HiringStarted(_)
            | EngagementDomainError::InvalidApplicationTransition { .. }
            | EngagementDomainError::LiveApplicationExists { .. } => ErrorCode::InvalidTransition,
            EngagementDomainError::CooldownActive {
                remaining_seconds, ..
            } => {
                return Self {
                    cooldown_remaining_seconds: Some(*remaining_seconds),
                    ..Self::new(ErrorCode::CooldownActive, err.to_string())
                };
            }
            EngagementDomainError::MissingReason(_) | EngagementDomainError::EmptyTitle => {
                ErrorCode::InvalidInput
            }
            EngagementDomainError::UnknownApplication { .. } => ErrorCode::NotFound,
        };
        Self::new(code, err.to_string())
    }
}

impl From<&EngagementRepositoryError> for ErrorBody {
    fn from(err: &EngagementRepositoryError) -> Self {
        match err {
            EngagementRepositoryError::NotFound(_) => {
                Self::new(ErrorCode::NotFound, err.to_string())
            }
            EngagementRepositoryError::DuplicateJob(_)
            | EngagementRepositoryError::VersionConflict { .. } => {
                Self::new(ErrorCode::Conflict, err.to_string())
            }
            EngagementRepositoryError::Persistence(_) => Self::internal(),
        }
    }
}

impl From<EngagementServiceError> for ErrorBody {
    fn from(err: EngagementServiceError) -> Self {
        match &err {
            EngagementServiceError::Domain(domain) => domain.into(),
            EngagementServiceError::Repository(repository) => repository.into(),
            EngagementServiceError::Scorer(_) => Self::internal(),
            EngagementServiceError::JobNotFound(_)
            | EngagementServiceError::ApplicationNotFound(_) => {
                Self::new(ErrorCode::NotFound, err.to_string())
            }
        }
    }
}

impl From<RatingServiceError> for ErrorBody {
    fn from(err: RatingServiceError) -> Self {
        let code = match &err {
            RatingServiceError::Domain(RatingDomainError::InvalidRating(_)) => {
                ErrorCode::InvalidInput
            }
            RatingServiceError::Domain(RatingDomainError::NotEligible { .. }) => {
                ErrorCode::NotEligible
            }
            RatingServiceError::Domain(RatingDomainError::AlreadyReviewed { .. })
            | RatingServiceError::Repository(ReviewRepositoryError::DuplicateReview { .. }) => {
                ErrorCode::AlreadyReviewed
            }
            RatingServiceError::Domain(RatingDomainError::AlreadyEdited(_))
            | RatingServiceError::Repository(ReviewRepositoryError::EditConflict(_)) => {
                ErrorCode::AlreadyEdited
            }
            RatingServiceError::Domain(RatingDomainError::NotAuthor { .. }) => ErrorCode::Forbidden,
            RatingServiceError::Repository(ReviewRepositoryError::NotFound(_))
            | RatingServiceError::JobNotFound(_)
            | RatingServiceError::ReviewNotFound(_) => ErrorCode::NotFound,
            RatingServiceError::Repository(ReviewRepositoryError::Persistence(_)) => {
                return Self::internal();
            }
            RatingServiceError::Engagement(engagement) => return engagement.into(),
        };
        Self::new(code, err.to_string())
    }
}

impl From<IdentityError> for ErrorBody {
    fn from(err: IdentityError) -> Self {
        match &err {
            IdentityError::UnknownSession => Self::new(ErrorCode::Unauthenticated, err.to_string()),
            IdentityError::Unavailable(_) => Self::internal(),
        }
    }
}
