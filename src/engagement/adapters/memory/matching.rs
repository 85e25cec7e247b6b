//! Fixed-table match scorer.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::engagement::{
    domain::JobId,
    ports::{MatchPercentage, MatchScore, MatchScorer, MatchScorerError},
};
use crate::identity::domain::UserId;

/// Scorer answering from a preloaded table of percentages per job.
#[derive(Debug, Clone, Default)]
pub struct StaticMatchScorer {
    table: Arc<RwLock<HashMap<JobId, Vec<MatchScore>>>>,
}

impl StaticMatchScorer {
    /// Creates a scorer with no scores.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the score of `tasker_id` for `job_id`, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`MatchScorerError`] if the table lock is poisoned.
    pub fn set_score(
        &self,
        job_id: JobId,
        tasker_id: UserId,
        percentage: u32,
    ) -> Result<(), MatchScorerError> {
        let mut table = self
            .table
            .write()
            .map_err(|err| MatchScorerError::new(std::io::Error::other(err.to_string())))?;
        let scores = table.entry(job_id).or_default();
        scores.retain(|score| score.tasker_id != tasker_id);
        scores.push(MatchScore {
            tasker_id,
            match_percentage: MatchPercentage::new(percentage),
        });
        Ok(())
    }
}

#[async_trait]
impl MatchScorer for StaticMatchScorer {
    async fn scores(&self, job_id: JobId) -> Result<Vec<MatchScore>, MatchScorerError> {
        let table = self
            .table
            .read()
            .map_err(|err| MatchScorerError::new(std::io::Error::other(err.to_string())))?;
        Ok(table.get(&job_id).cloned().unwrap_or_default())
    }
}
