//! Domain model for reviews and rating obligations.

mod error;
mod obligation;
mod review;

pub use error::{IneligibilityReason, ParseRaterRoleError, RatingDomainError};
pub use obligation::{RatingObligations, TaskerObligation, establish_rater_role};
pub use review::{PersistedReviewData, RaterRole, Rating, Review, ReviewDraft, ReviewId};
