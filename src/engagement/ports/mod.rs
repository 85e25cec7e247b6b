//! Port contracts for job engagement.
//!
//! Ports define infrastructure-agnostic interfaces used by engagement
//! services.

pub mod matching;
pub mod repository;

pub use matching::{MatchPercentage, MatchScore, MatchScorer, MatchScorerError};
pub use repository::{
    ApplicationQuery, EngagementRepository, EngagementRepositoryError, EngagementRepositoryResult,
};
