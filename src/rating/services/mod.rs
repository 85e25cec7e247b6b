//! Application services for reviews.

mod error;
mod reviews;

pub use error::{RatingServiceError, RatingServiceResult};
pub use reviews::{EditReviewRequest, RatingService, SubmitReviewRequest};
