//! Service layer for the application state machine and reapplication
//! cooldown.

use super::{
    EngagementServiceError, EngagementServiceResult,
    commit::{commit, load_board, load_board_of_application},
};
use crate::engagement::{
    domain::{
        Application, ApplicationId, ApplicationRoster, ApplicationStatus, Budget,
        EngagementDomainError, JobBoard, JobId, LifecycleAction, ReapplicationCooldown,
        ReapplicationStatus,
    },
    ports::{ApplicationQuery, EngagementRepository},
};
use crate::events::ports::EventPublisher;
use crate::identity::domain::{Actor, UserId};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Request payload for submitting an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    job_id: JobId,
    cover_letter: Option<String>,
    proposed_budget: Option<u64>,
}

impl ApplyRequest {
    /// Creates a request for `job_id`.
    #[must_use]
    pub const fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            cover_letter: None,
            proposed_budget: None,
        }
    }

    /// Sets the cover letter.
    #[must_use]
    pub fn with_cover_letter(mut self, cover_letter: impl Into<String>) -> Self {
        self.cover_letter = Some(cover_letter.into());
        self
    }

    /// Sets the proposed budget in minor currency units.
    #[must_use]
    pub const fn with_proposed_budget(mut self, minor_units: u64) -> Self {
        self.proposed_budget = Some(minor_units);
        self
    }
}

/// Request payload for moving an application to a target status.
///
/// Mirrors the `{status, reason?}` body of an application patch; the edge
/// taken is resolved from the application's current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionApplicationRequest {
    application_id: ApplicationId,
    target: ApplicationStatus,
    reason: Option<String>,
}

impl TransitionApplicationRequest {
    /// Creates a request moving `application_id` to `target`.
    #[must_use]
    pub const fn new(application_id: ApplicationId, target: ApplicationStatus) -> Self {
        Self {
            application_id,
            target,
            reason: None,
        }
    }

    /// Attaches a termination or resignation reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Application lifecycle orchestration service.
#[derive(Clone)]
pub struct ApplicationLifecycleService<R, P, C>
where
    R: EngagementRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    publisher: Arc<P>,
    clock: Arc<C>,
    cooldown: ReapplicationCooldown,
}

impl<R, P, C> ApplicationLifecycleService<R, P, C>
where
    R: EngagementRepository,
    P: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new application lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        publisher: Arc<P>,
        clock: Arc<C>,
        cooldown: ReapplicationCooldown,
    ) -> Self {
        Self {
            repository,
            publisher,
            clock,
            cooldown,
        }
    }

    /// Returns the configured reapplication cooldown.
    #[must_use]
    pub const fn cooldown(&self) -> ReapplicationCooldown {
        self.cooldown
    }

    /// Submits a pending application for the calling tasker.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::JobNotFound`] for unknown jobs,
    /// domain errors when the caller is not a tasker, the job is not open,
    /// the tasker already holds a live application or a cooldown is active,
    /// and repository errors including version conflicts.
    pub async fn apply(
        &self,
        actor: Actor,
        request: ApplyRequest,
    ) -> EngagementServiceResult<Application> {
        let job_id = request.job_id;
        JobBoard::ensure_applicant_role(job_id, actor)
            .inspect_err(|err| debug!(%job_id, %actor, %err, "application rejected by guard"))?;
        let mut board = self.load_for_update(job_id).await?;
        board
            .check_apply(actor, &self.cooldown, self.clock.utc())
            .inspect_err(|err| debug!(%job_id, %actor, %err, "application rejected by guard"))?;
        let application_id = self.repository.next_application_id().await?;
        let application = board
            .apply(
                application_id,
                actor,
                request.cover_letter,
                request.proposed_budget.map(Budget::from_minor_units),
                &self.cooldown,
                &*self.clock,
            )?
            .clone();
        commit(&*self.repository, &*self.publisher, &mut board).await?;
        info!(%job_id, %application_id, %actor, "application submitted");
        Ok(application)
    }

    /// Hires a pending applicant.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::ApplicationNotFound`] for unknown
    /// applications, domain errors for non-owners or invalid edges, and
    /// repository errors including version conflicts.
    pub async fn accept(
        &self,
        application_id: ApplicationId,
        actor: Actor,
    ) -> EngagementServiceResult<Application> {
        self.transition_with(application_id, actor, LifecycleAction::Accept, None)
            .await
    }

    /// Declines a pending applicant.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::ApplicationNotFound`] for unknown
    /// applications, domain errors for non-owners or invalid edges, and
    /// repository errors including version conflicts.
    pub async fn reject(
        &self,
        application_id: ApplicationId,
        actor: Actor,
    ) -> EngagementServiceResult<Application> {
        self.transition_with(application_id, actor, LifecycleAction::Reject, None)
            .await
    }

    /// Withdraws the caller's own pending application and starts the
    /// cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::ApplicationNotFound`] for unknown
    /// applications, domain errors for other callers or invalid edges, and
    /// repository errors including version conflicts.
    pub async fn withdraw(
        &self,
        application_id: ApplicationId,
        actor: Actor,
    ) -> EngagementServiceResult<Application> {
        self.transition_with(application_id, actor, LifecycleAction::Withdraw, None)
            .await
    }

    /// Fires a hired tasker from an in-progress job.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::ApplicationNotFound`] for unknown
    /// applications, domain errors for non-owners, invalid edges or a blank
    /// reason, and repository errors including version conflicts.
    pub async fn terminate(
        &self,
        application_id: ApplicationId,
        actor: Actor,
        reason: &str,
    ) -> EngagementServiceResult<Application> {
        self.transition_with(
            application_id,
            actor,
            LifecycleAction::Terminate,
            Some(reason),
        )
        .await
    }

    /// Lets a hired tasker leave an in-progress job.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::ApplicationNotFound`] for unknown
    /// applications, domain errors for other callers, invalid edges or a
    /// blank reason, and repository errors including version conflicts.
    pub async fn resign(
        &self,
        application_id: ApplicationId,
        actor: Actor,
        reason: &str,
    ) -> EngagementServiceResult<Application> {
        self.transition_with(application_id, actor, LifecycleAction::Resign, Some(reason))
            .await
    }

    /// Moves an application to the requested status along the matching
    /// edge of the state machine.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::ApplicationNotFound`] for unknown
    /// applications,
    /// [`EngagementDomainError::InvalidApplicationTransition`] when no edge
    /// connects the current and requested statuses, and every error of the
    /// individual edge operations.
    pub async fn transition(
        &self,
        actor: Actor,
        request: TransitionApplicationRequest,
    ) -> EngagementServiceResult<Application> {
        let TransitionApplicationRequest {
            application_id,
            target,
            reason,
        } = request;
        let mut board = self.load_application_for_update(application_id).await?;
        let current = board.application(application_id)?.status();
        let Some(action) = JobBoard::action_towards(current, target) else {
            let err = EngagementDomainError::InvalidApplicationTransition {
                application_id,
                status: current,
                job_status: board.job().status(),
                action: requested_action(target),
            };
            debug!(%application_id, %actor, %err, "application transition rejected");
            return Err(EngagementServiceError::Domain(err));
        };
        self.apply_edge(&mut board, application_id, actor, action, reason.as_deref())
            .await
    }

    /// Retrieves an application by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::Repository`] when the lookup fails.
    pub async fn find_application(
        &self,
        application_id: ApplicationId,
    ) -> EngagementServiceResult<Option<Application>> {
        let Some(job_id) = self
            .repository
            .find_job_of_application(application_id)
            .await?
        else {
            return Ok(None);
        };
        let board = self.repository.load_board(job_id).await?;
        Ok(board.and_then(|loaded| loaded.application(application_id).ok().cloned()))
    }

    /// Returns applications matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::Repository`] when the lookup fails.
    pub async fn find_applications(
        &self,
        query: ApplicationQuery,
    ) -> EngagementServiceResult<Vec<Application>> {
        Ok(self.repository.find_applications(query).await?)
    }

    /// Groups a job's applications by outcome.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::JobNotFound`] for unknown jobs and
    /// repository errors when the lookup fails.
    pub async fn roster(&self, job_id: JobId) -> EngagementServiceResult<ApplicationRoster> {
        let board = load_board(&*self.repository, job_id).await?;
        Ok(board.roster())
    }

    /// Reports whether `tasker_id` may apply to `job_id` right now, including
    /// the seconds left on an active cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementServiceError::JobNotFound`] for unknown jobs and
    /// repository errors when the lookup fails.
    pub async fn reapplication_status(
        &self,
        job_id: JobId,
        tasker_id: UserId,
    ) -> EngagementServiceResult<ReapplicationStatus> {
        let board = load_board(&*self.repository, job_id).await?;
        Ok(board.reapplication_status(tasker_id, &self.cooldown, self.clock.utc()))
    }

    async fn transition_with(
        &self,
        application_id: ApplicationId,
        actor: Actor,
        action: LifecycleAction,
        reason: Option<&str>,
    ) -> EngagementServiceResult<Application> {
        let mut board = self.load_application_for_update(application_id).await?;
        self.apply_edge(&mut board, application_id, actor, action, reason)
            .await
    }

    async fn apply_edge(
        &self,
        board: &mut JobBoard,
        application_id: ApplicationId,
        actor: Actor,
        action: LifecycleAction,
        reason: Option<&str>,
    ) -> EngagementServiceResult<Application> {
        let clock = &*self.clock;
        let reason_text = reason.unwrap_or_default();
        let outcome = match action {
            LifecycleAction::Accept => board.accept(application_id, actor, clock),
            LifecycleAction::Reject => board.reject(application_id, actor, clock),
            LifecycleAction::Withdraw => {
                board.withdraw(application_id, actor, &self.cooldown, clock)
            }
            LifecycleAction::Terminate => {
                board.terminate(application_id, actor, reason_text, clock)
            }
            LifecycleAction::Resign => board.resign(application_id, actor, reason_text, clock),
            other => {
                let application = board.application(application_id)?;
                Err(EngagementDomainError::InvalidApplicationTransition {
                    application_id,
                    status: application.status(),
                    job_status: board.job().status(),
                    action: other,
                })
            }
        };
        let application = outcome
            .inspect_err(|err| {
                debug!(%application_id, %actor, %action, %err, "application transition rejected");
            })?
            .clone();
        commit(&*self.repository, &*self.publisher, board).await?;
        info!(
            job_id = %application.job_id(),
            %application_id,
            %actor,
            %action,
            status = %application.status(),
            "application transition applied"
        );
        Ok(application)
    }

    async fn load_for_update(&self, job_id: JobId) -> EngagementServiceResult<JobBoard> {
        let mut board = load_board(&*self.repository, job_id).await?;
        board.purge_elapsed_cooldowns(&self.cooldown, self.clock.utc());
        Ok(board)
    }

    async fn load_application_for_update(
        &self,
        application_id: ApplicationId,
    ) -> EngagementServiceResult<JobBoard> {
        let mut board = load_board_of_application(&*self.repository, application_id).await?;
        board.purge_elapsed_cooldowns(&self.cooldown, self.clock.utc());
        Ok(board)
    }
}

/// The action a caller most plausibly meant when asking for `target`.
const fn requested_action(target: ApplicationStatus) -> LifecycleAction {
    match target {
        ApplicationStatus::Pending => LifecycleAction::Apply,
        ApplicationStatus::Accepted => LifecycleAction::Accept,
        ApplicationStatus::Rejected => LifecycleAction::Reject,
        ApplicationStatus::Withdrawn => LifecycleAction::Withdraw,
    }
}

