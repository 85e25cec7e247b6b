//! In-memory job board repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::engagement::{
    domain::{Application, ApplicationId, Job, JobBoard, JobId, PersistedBoardData},
    ports::{
        ApplicationQuery, EngagementRepository, EngagementRepositoryError,
        EngagementRepositoryResult,
    },
};
use crate::identity::domain::UserId;

/// Thread-safe in-memory board repository.
///
/// Version checks run under the write lock, so two transitions loaded from
/// the same version cannot both be saved.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngagementRepository {
    state: Arc<RwLock<InMemoryEngagementState>>,
}

#[derive(Debug, Default)]
struct InMemoryEngagementState {
    boards: BTreeMap<JobId, StoredBoard>,
    application_index: BTreeMap<ApplicationId, JobId>,
    last_job_id: i64,
    last_application_id: i64,
}

#[derive(Debug, Clone)]
struct StoredBoard {
    data: PersistedBoardData,
}

impl StoredBoard {
    fn from_board(board: &JobBoard, version: u64) -> Self {
        Self {
            data: PersistedBoardData {
                job: board.job().clone(),
                applications: board.applications().to_vec(),
                cooldowns: board.cooldowns().clone(),
                version,
            },
        }
    }
}

impl InMemoryEngagementRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state(
        &self,
    ) -> EngagementRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryEngagementState>> {
        self.state.write().map_err(|err| {
            EngagementRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn read_state(
        &self,
    ) -> EngagementRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryEngagementState>> {
        self.state.read().map_err(|err| {
            EngagementRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn index_applications(state: &mut InMemoryEngagementState, board: &JobBoard) {
    let job_id = board.job().id();
    for application in board.applications() {
        state.application_index.insert(application.id(), job_id);
    }
}

fn ensure_version(
    state: &InMemoryEngagementState,
    job_id: JobId,
    expected: u64,
) -> EngagementRepositoryResult<()> {
    let stored = state
        .boards
        .get(&job_id)
        .ok_or(EngagementRepositoryError::NotFound(job_id))?;
    if stored.data.version != expected {
        return Err(EngagementRepositoryError::VersionConflict { job_id, expected });
    }
    Ok(())
}

#[async_trait]
impl EngagementRepository for InMemoryEngagementRepository {
    async fn next_job_id(&self) -> EngagementRepositoryResult<JobId> {
        let mut state = self.write_state()?;
        state.last_job_id = state.last_job_id.saturating_add(1);
        Ok(JobId::new(state.last_job_id))
    }

    async fn next_application_id(&self) -> EngagementRepositoryResult<ApplicationId> {
        let mut state = self.write_state()?;
        state.last_application_id = state.last_application_id.saturating_add(1);
        Ok(ApplicationId::new(state.last_application_id))
    }

    async fn insert_board(&self, board: &JobBoard) -> EngagementRepositoryResult<()> {
        let mut state = self.write_state()?;
        let job_id = board.job().id();
        if state.boards.contains_key(&job_id) {
            return Err(EngagementRepositoryError::DuplicateJob(job_id));
        }
        index_applications(&mut state, board);
        state
            .boards
            .insert(job_id, StoredBoard::from_board(board, 0));
        Ok(())
    }

    async fn save_board(&self, board: &JobBoard) -> EngagementRepositoryResult<()> {
        let mut state = self.write_state()?;
        let job_id = board.job().id();
        ensure_version(&state, job_id, board.version())?;
        index_applications(&mut state, board);
        let next_version = board.version().saturating_add(1);
        state
            .boards
            .insert(job_id, StoredBoard::from_board(board, next_version));
        Ok(())
    }

    async fn delete_board(
        &self,
        job_id: JobId,
        expected_version: u64,
    ) -> EngagementRepositoryResult<()> {
        let mut state = self.write_state()?;
        ensure_version(&state, job_id, expected_version)?;
        state.boards.remove(&job_id);
        state
            .application_index
            .retain(|_, indexed_job| *indexed_job != job_id);
        Ok(())
    }

    async fn load_board(&self, job_id: JobId) -> EngagementRepositoryResult<Option<JobBoard>> {
        let state = self.read_state()?;
        Ok(state
            .boards
            .get(&job_id)
            .map(|stored| JobBoard::from_persisted(stored.data.clone())))
    }

    async fn find_job_of_application(
        &self,
        application_id: ApplicationId,
    ) -> EngagementRepositoryResult<Option<JobId>> {
        let state = self.read_state()?;
        Ok(state.application_index.get(&application_id).copied())
    }

    async fn list_jobs_by_customer(
        &self,
        customer_id: UserId,
    ) -> EngagementRepositoryResult<Vec<Job>> {
        let state = self.read_state()?;
        Ok(state
            .boards
            .values()
            .map(|stored| &stored.data.job)
            .filter(|job| job.customer_id() == customer_id)
            .cloned()
            .collect())
    }

    async fn find_applications(
        &self,
        query: ApplicationQuery,
    ) -> EngagementRepositoryResult<Vec<Application>> {
        let state = self.read_state()?;
        let mut applications: Vec<Application> = state
            .boards
            .values()
            .filter(|stored| query.job_id.is_none_or(|job_id| stored.data.job.id() == job_id))
            .flat_map(|stored| stored.data.applications.iter())
            .filter(|application| query.matches(application))
            .cloned()
            .collect();
        applications.sort_by_key(Application::id);
        Ok(applications)
    }
}
