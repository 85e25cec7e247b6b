//! Ordering and annotation of job lists by external match scores.

use super::{EngagementServiceResult, commit::load_board};
use crate::engagement::{
    domain::{Application, ApplicationStatus, JobId},
    ports::{EngagementRepository, MatchPercentage, MatchScore, MatchScorer},
};
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// An application annotated with its tasker's match percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedApplication {
    /// The application.
    pub application: Application,
    /// The tasker's score, when the scorer returned one.
    pub match_percentage: Option<MatchPercentage>,
}

/// Thin consumer of the external scoring service.
#[derive(Clone)]
pub struct MatchRankingService<R, S>
where
    R: EngagementRepository,
    S: MatchScorer,
{
    repository: Arc<R>,
    scorer: Arc<S>,
}

impl<R, S> MatchRankingService<R, S>
where
    R: EngagementRepository,
    S: MatchScorer,
{
    /// Creates a new ranking service.
    #[must_use]
    pub const fn new(repository: Arc<R>, scorer: Arc<S>) -> Self {
        Self { repository, scorer }
    }

    /// Returns the scorer's candidates for a job, best match first.
    ///
    /// Ties are broken by tasker identifier so the order is stable; a tasker
    /// scored twice keeps only their best score.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::JobNotFound`] for unknown jobs,
    /// and repository or scorer errors.
    pub async fn matches(&self, job_id: JobId) -> EngagementServiceResult<Vec<MatchScore>> {
        load_board(&*self.repository, job_id).await?;
        let mut scores = self.scorer.scores(job_id).await?;
        scores.sort_by_key(|score| (Reverse(score.match_percentage), score.tasker_id));
        let mut seen = HashSet::new();
        scores.retain(|score| seen.insert(score.tasker_id));
        Ok(scores)
    }

    /// Returns a job's applications annotated with match percentages, best
    /// match first and unscored taskers last.
    ///
    /// `status` restricts the list to one application status.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::JobNotFound`] for unknown jobs,
    /// and repository or scorer errors.
    pub async fn ranked_applications(
        &self,
        job_id: JobId,
        status: Option<ApplicationStatus>,
    ) -> EngagementServiceResult<Vec<RankedApplication>> {
        let board = load_board(&*self.repository, job_id).await?;
        let mut scores: HashMap<UserId, MatchPercentage> = HashMap::new();
        for score in self.scorer.scores(job_id).await? {
            scores
                .entry(score.tasker_id)
                .and_modify(|best| *best = (*best).max(score.match_percentage))
                .or_insert(score.match_percentage);
        }

        let mut ranked: Vec<RankedApplication> = board
            .applications()
            .iter()
            .filter(|application| status.is_none_or(|wanted| application.status() == wanted))
            .map(|application| RankedApplication {
                match_percentage: scores.get(&application.tasker_id()).copied(),
                application: application.clone(),
            })
            .collect();
        ranked.sort_by_key(|entry| (Reverse(entry.match_percentage), entry.application.id()));
        Ok(ranked)
    }
}
