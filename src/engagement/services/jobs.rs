//! Service layer for job posting and the job status state machine.

use super::{
    EngagementServiceResult,
    commit::{commit, load_board, publish},
};
use crate::engagement::{
    domain::{Budget, Job, JobBoard, JobDetails, JobId, LifecycleAction},
    ports::EngagementRepository,
};
use crate::events::ports::EventPublisher;
use crate::identity::domain::{Actor, UserId};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Request payload describing a job's editable details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetailsRequest {
    title: String,
    description: Option<String>,
    budget: Option<u64>,
    required_skills: Vec<String>,
}

impl JobDetailsRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            budget: None,
            required_skills: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the budget in minor currency units.
    #[must_use]
    pub const fn with_budget(mut self, minor_units: u64) -> Self {
        self.budget = Some(minor_units);
        self
    }

    /// Sets the required skills.
    #[must_use]
    pub fn with_required_skills(mut self, skills: impl IntoIterator<Item = String>) -> Self {
        self.required_skills = skills.into_iter().collect();
        self
    }

    fn into_details(self) -> EngagementServiceResult<JobDetails> {
        let mut details = JobDetails::new(self.title)?.with_required_skills(self.required_skills);
        if let Some(description) = self.description {
            details = details.with_description(description);
        }
        if let Some(minor_units) = self.budget {
            details = details.with_budget(Budget::from_minor_units(minor_units));
        }
        Ok(details)
    }
}

/// Job lifecycle orchestration service.
#[derive(Clone)]
pub struct JobLifecycleService<R, P, C>
where
    R: EngagementRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    publisher: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> JobLifecycleService<R, P, C>
where
    R: EngagementRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new job lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, publisher: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            publisher,
            clock,
        }
    }

    /// Posts a new open job owned by the calling customer.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::Domain`] when the caller is not
    /// a customer or the details are invalid, and repository errors when
    /// persistence fails.
    pub async fn create_job(
        &self,
        actor: Actor,
        request: JobDetailsRequest,
    ) -> EngagementServiceResult<Job> {
        let details = request.into_details()?;
        let job_id = self.repository.next_job_id().await?;
        let mut board = JobBoard::post(job_id, actor, details, &*self.clock)?;
        self.repository.insert_board(&board).await?;
        publish(&*self.publisher, &mut board).await;
        info!(%job_id, %actor, "job posted");
        Ok(board.job().clone())
    }

    /// Starts an open job that has at least one accepted application.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::JobNotFound`] for unknown jobs,
    /// domain errors for non-owners, non-open jobs or jobs without a hire,
    /// and repository errors including version conflicts.
    pub async fn start_job(&self, job_id: JobId, actor: Actor) -> EngagementServiceResult<Job> {
        self.transition(job_id, actor, LifecycleAction::Start, |board, clock| {
            board.start(actor, clock)
        })
        .await
    }

    /// Finishes an in-progress job, opening the rating obligations.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::JobNotFound`] for unknown jobs,
    /// domain errors for non-owners or jobs not in progress, and repository
    /// errors including version conflicts.
    pub async fn finish_job(&self, job_id: JobId, actor: Actor) -> EngagementServiceResult<Job> {
        self.transition(job_id, actor, LifecycleAction::Finish, |board, clock| {
            board.finish(actor, clock)
        })
        .await
    }

    /// Cancels an open or in-progress job.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::JobNotFound`] for unknown jobs,
    /// domain errors for non-owners or terminal jobs, and repository errors
    /// including version conflicts.
    pub async fn cancel_job(&self, job_id: JobId, actor: Actor) -> EngagementServiceResult<Job> {
        self.transition(job_id, actor, LifecycleAction::Cancel, |board, clock| {
            board.cancel(actor, clock)
        })
        .await
    }

    /// Replaces the details of an open job.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::JobNotFound`] for unknown jobs,
    /// domain errors for non-owners, invalid details or jobs past `open`,
    /// and repository errors including version conflicts.
    pub async fn edit_job(
        &self,
        job_id: JobId,
        actor: Actor,
        request: JobDetailsRequest,
    ) -> EngagementServiceResult<Job> {
        let details = request.into_details()?;
        self.transition(job_id, actor, LifecycleAction::Edit, move |board, clock| {
            board.edit(actor, details, clock)
        })
        .await
    }

    /// Deletes an open job nobody has been hired for.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::JobNotFound`] for unknown jobs,
    /// domain errors for non-owners, jobs past `open` or jobs with a hire,
    /// and repository errors including version conflicts.
    pub async fn delete_job(&self, job_id: JobId, actor: Actor) -> EngagementServiceResult<()> {
        let mut board = load_board(&*self.repository, job_id).await?;
        board
            .delete(actor, &*self.clock)
            .inspect_err(|err| debug!(%job_id, %actor, %err, "job deletion rejected"))?;
        self.repository
            .delete_board(job_id, board.version())
            .await?;
        publish(&*self.publisher, &mut board).await;
        info!(%job_id, %actor, "job deleted");
        Ok(())
    }

    /// Retrieves a job by identifier.
    ///
    /// Returns `Ok(None)` when the job does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::Repository`] when the lookup
    /// fails.
    pub async fn find_job(&self, job_id: JobId) -> EngagementServiceResult<Option<Job>> {
        let board = self.repository.load_board(job_id).await?;
        Ok(board.map(|loaded| loaded.job().clone()))
    }

    /// Lists the jobs posted by a customer.
    ///
    /// # Errors
    ///
    /// Returns [`super::EngagementServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list_jobs_for_customer(
        &self,
        customer_id: UserId,
    ) -> EngagementServiceResult<Vec<Job>> {
        Ok(self.repository.list_jobs_by_customer(customer_id).await?)
    }

    async fn transition<F>(
        &self,
        job_id: JobId,
        actor: Actor,
        action: LifecycleAction,
        apply: F,
    ) -> EngagementServiceResult<Job>
    where
        F: FnOnce(&mut JobBoard, &C) -> Result<(), crate::engagement::domain::EngagementDomainError>
            + Send,
    {
        let mut board = load_board(&*self.repository, job_id).await?;
        apply(&mut board, &*self.clock)
            .inspect_err(|err| debug!(%job_id, %actor, %action, %err, "job transition rejected"))?;
        commit(&*self.repository, &*self.publisher, &mut board).await?;
        info!(%job_id, %actor, %action, status = %board.job().status(), "job transition applied");
        Ok(board.job().clone())
    }
}
