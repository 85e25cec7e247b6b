//! Typed request bodies.

use crate::engagement::{
    domain::{ApplicationId, ApplicationStatus, JobId},
    services::{ApplyRequest, JobDetailsRequest, TransitionApplicationRequest},
};
use crate::identity::domain::UserId;
use crate::rating::{
    domain::ReviewId,
    services::{EditReviewRequest, SubmitReviewRequest},
};
use serde::{Deserialize, Serialize};

/// Body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    /// Job title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional budget in minor currency units.
    #[serde(default)]
    pub budget: Option<u64>,
    /// Required skills.
    #[serde(default)]
    pub required_skills: Vec<String>,
}

impl From<NewJob> for JobDetailsRequest {
    fn from(body: NewJob) -> Self {
        let mut request = Self::new(body.title).with_required_skills(body.required_skills);
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(budget) = body.budget {
            request = request.with_budget(budget);
        }
        request
    }
}

/// Body of `POST /applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    /// Job applied to.
    pub job_id: JobId,
    /// Optional pitch.
    #[serde(default)]
    pub cover_letter: Option<String>,
    /// Optional counter-offer in minor currency units.
    #[serde(default)]
    pub proposed_budget: Option<u64>,
}

impl From<NewApplication> for ApplyRequest {
    fn from(body: NewApplication) -> Self {
        let mut request = Self::new(body.job_id);
        if let Some(cover_letter) = body.cover_letter {
            request = request.with_cover_letter(cover_letter);
        }
        if let Some(budget) = body.proposed_budget {
            request = request.with_proposed_budget(budget);
        }
        request
    }
}

/// Body of `PATCH /applications/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatch {
    /// Requested status.
    pub status: ApplicationStatus,
    /// Reason, required when firing or resigning.
    #[serde(default)]
    pub reason: Option<String>,
}

impl ApplicationPatch {
    /// Binds the patch to the application it targets.
    #[must_use]
    pub fn into_request(self, application_id: ApplicationId) -> TransitionApplicationRequest {
        let mut request = TransitionApplicationRequest::new(application_id, self.status);
        if let Some(reason) = self.reason {
            request = request.with_reason(reason);
        }
        request
    }
}

/// Body of `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    /// Job reviewed.
    pub job_id: JobId,
    /// Reviewed party.
    pub ratee_id: UserId,
    /// Stars, 1 to 5.
    pub rating: u8,
    /// Optional comment.
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<NewReview> for SubmitReviewRequest {
    fn from(body: NewReview) -> Self {
        let mut request = Self::new(body.job_id, body.ratee_id, body.rating);
        if let Some(comment) = body.comment {
            request = request.with_comment(comment);
        }
        request
    }
}

/// Body of `PATCH /reviews/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    /// Replacement stars, 1 to 5.
    pub rating: u8,
    /// Replacement comment; omitting it clears the comment.
    #[serde(default)]
    pub comment: Option<String>,
}

impl ReviewPatch {
    /// Binds the patch to the review it targets.
    #[must_use]
    pub fn into_request(self, review_id: ReviewId) -> EditReviewRequest {
        let mut request = EditReviewRequest::new(review_id, self.rating);
        if let Some(comment) = self.comment {
            request = request.with_comment(comment);
        }
        request
    }
}
