//! In-memory review repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::engagement::domain::JobId;
use crate::rating::{
    domain::{Review, ReviewId},
    ports::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult},
};

/// Thread-safe in-memory review repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewRepository {
    state: Arc<RwLock<InMemoryReviewState>>,
}

#[derive(Debug, Default)]
struct InMemoryReviewState {
    reviews: BTreeMap<ReviewId, Review>,
    last_review_id: i64,
}

impl InMemoryReviewRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state(
        &self,
    ) -> ReviewRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryReviewState>> {
        self.state.write().map_err(|err| {
            ReviewRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read_state(
        &self,
    ) -> ReviewRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryReviewState>> {
        self.state.read().map_err(|err| {
            ReviewRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn next_review_id(&self) -> ReviewRepositoryResult<ReviewId> {
        let mut state = self.write_state()?;
        state.last_review_id = state.last_review_id.saturating_add(1);
        Ok(ReviewId::new(state.last_review_id))
    }

    async fn store(&self, review: &Review) -> ReviewRepositoryResult<()> {
        let mut state = self.write_state()?;
        let duplicate = state.reviews.values().any(|stored| {
            stored.job_id() == review.job_id()
                && stored.rater_id() == review.rater_id()
                && stored.ratee_id() == review.ratee_id()
        });
        if duplicate || state.reviews.contains_key(&review.id()) {
            return Err(ReviewRepositoryError::DuplicateReview {
                job_id: review.job_id(),
                rater_id: review.rater_id(),
                ratee_id: review.ratee_id(),
            });
        }
        state.reviews.insert(review.id(), review.clone());
        Ok(())
    }

    async fn save_edit(&self, review: &Review) -> ReviewRepositoryResult<()> {
        let mut state = self.write_state()?;
        let stored = state
            .reviews
            .get_mut(&review.id())
            .ok_or(ReviewRepositoryError::NotFound(review.id()))?;
        if stored.is_edited() {
            return Err(ReviewRepositoryError::EditConflict(review.id()));
        }
        *stored = review.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ReviewId) -> ReviewRepositoryResult<Option<Review>> {
        let state = self.read_state()?;
        Ok(state.reviews.get(&id).cloned())
    }

    async fn find_by_job(&self, job_id: JobId) -> ReviewRepositoryResult<Vec<Review>> {
        let state = self.read_state()?;
        Ok(state
            .reviews
            .values()
            .filter(|review| review.job_id() == job_id)
            .cloned()
            .collect())
    }
}
