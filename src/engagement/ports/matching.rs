//! Port for the external match-percentage scoring service.
//!
//! The engine never computes scores; it only orders and annotates lists
//! with whatever the scorer returns.

use crate::engagement::domain::JobId;
use crate::identity::domain::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// A whole-number match percentage clamped into `0..=100`.
///
/// Decoding clamps as well, so scorer payloads never carry values above the
/// scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u8")]
pub struct MatchPercentage(u8);

impl MatchPercentage {
    /// Upper bound of the scale.
    pub const MAX: Self = Self(100);

    /// Creates a percentage, clamping values above [`Self::MAX`].
    #[must_use]
    pub fn new(value: u32) -> Self {
        u8::try_from(value).map_or(Self::MAX, |narrow| Self(narrow).min(Self::MAX))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u32> for MatchPercentage {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<MatchPercentage> for u8 {
    fn from(percentage: MatchPercentage) -> Self {
        percentage.0
    }
}

/// How well one tasker fits a job's required skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    /// Scored tasker.
    pub tasker_id: UserId,
    /// Fit percentage.
    pub match_percentage: MatchPercentage,
}

/// External scoring service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Returns scores for every tasker the service considers for `job_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchScorerError`] when the service cannot be reached.
    async fn scores(&self, job_id: JobId) -> Result<Vec<MatchScore>, MatchScorerError>;
}

/// Errors returned by match scorers.
#[derive(Debug, Clone, Error)]
#[error("match scoring unavailable: {0}")]
pub struct MatchScorerError(pub Arc<dyn std::error::Error + Send + Sync>);

impl MatchScorerError {
    /// Wraps a scorer failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
