//! Job board aggregate: a job, its applications and cooldown anchors.

use super::{
    Application, ApplicationId, ApplicationOutcome, ApplicationRoster, ApplicationStatus,
    Budget, ClosingNote, EngagementDomainError, Job, JobDetails, JobId, JobStatus,
    LifecycleAction, ReapplicationCooldown, ReapplicationStatus, whole_seconds_ceil,
};
use crate::events::domain::{DomainEvent, EventPayload};
use crate::identity::domain::{Actor, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeMap;

/// One edge of the application state machine.
#[derive(Debug, Clone, Copy)]
struct Edge {
    action: LifecycleAction,
    from: ApplicationStatus,
    to: ApplicationStatus,
    job_status: JobStatus,
}

const ACCEPT: Edge = Edge {
    action: LifecycleAction::Accept,
    from: ApplicationStatus::Pending,
    to: ApplicationStatus::Accepted,
    job_status: JobStatus::Open,
};

const REJECT: Edge = Edge {
    action: LifecycleAction::Reject,
    from: ApplicationStatus::Pending,
    to: ApplicationStatus::Rejected,
    job_status: JobStatus::Open,
};

const WITHDRAW: Edge = Edge {
    action: LifecycleAction::Withdraw,
    from: ApplicationStatus::Pending,
    to: ApplicationStatus::Withdrawn,
    job_status: JobStatus::Open,
};

const TERMINATE: Edge = Edge {
    action: LifecycleAction::Terminate,
    from: ApplicationStatus::Accepted,
    to: ApplicationStatus::Rejected,
    job_status: JobStatus::InProgress,
};

const RESIGN: Edge = Edge {
    action: LifecycleAction::Resign,
    from: ApplicationStatus::Accepted,
    to: ApplicationStatus::Withdrawn,
    job_status: JobStatus::InProgress,
};

const EDGES: [Edge; 5] = [ACCEPT, REJECT, WITHDRAW, TERMINATE, RESIGN];

/// Consistency boundary for one job and everything submitted against it.
///
/// Every guard that depends on the aggregate (uniqueness of live
/// applications, "start requires a hire", cooldowns) is evaluated against a
/// single loaded board, and the board is persisted as a whole with an
/// optimistic `version` check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobBoard {
    job: Job,
    applications: Vec<Application>,
    cooldowns: BTreeMap<UserId, DateTime<Utc>>,
    version: u64,
    events: Vec<DomainEvent>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted job.
    pub job: Job,
    /// Persisted applications, in submission order.
    pub applications: Vec<Application>,
    /// Cooldown anchors keyed by tasker.
    pub cooldowns: BTreeMap<UserId, DateTime<Utc>>,
    /// Stored version used for optimistic concurrency.
    pub version: u64,
}

impl JobBoard {
    /// Posts a new open job on behalf of a customer.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] when the actor is not a
    /// customer.
    pub fn post(
        id: JobId,
        actor: Actor,
        details: JobDetails,
        clock: &impl Clock,
    ) -> Result<Self, EngagementDomainError> {
        if actor.role() != Role::Customer {
            return Err(EngagementDomainError::Forbidden {
                job_id: id,
                actor,
                action: LifecycleAction::Post,
            });
        }
        let job = Job::new(id, actor.user_id(), details, clock);
        let mut board = Self {
            job,
            applications: Vec::new(),
            cooldowns: BTreeMap::new(),
            version: 0,
            events: Vec::new(),
        };
        board.record(
            EventPayload::JobPosted {
                job_id: id,
                customer_id: actor.user_id(),
            },
            clock,
        );
        Ok(board)
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        let mut applications = data.applications;
        applications.sort_by_key(Application::id);
        Self {
            job: data.job,
            applications,
            cooldowns: data.cooldowns,
            version: data.version,
            events: Vec::new(),
        }
    }

    /// Returns the job.
    #[must_use]
    pub const fn job(&self) -> &Job {
        &self.job
    }

    /// Returns every application instance in submission order.
    #[must_use]
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Returns the cooldown anchors keyed by tasker.
    #[must_use]
    pub const fn cooldowns(&self) -> &BTreeMap<UserId, DateTime<Utc>> {
        &self.cooldowns
    }

    /// Returns the version the board was loaded at.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns events recorded since the board was loaded.
    #[must_use]
    pub fn pending_events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Drains events recorded since the board was loaded.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Looks up an application on this board.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::UnknownApplication`] when the
    /// application belongs to another job or does not exist.
    pub fn application(
        &self,
        application_id: ApplicationId,
    ) -> Result<&Application, EngagementDomainError> {
        self.applications
            .iter()
            .find(|application| application.id() == application_id)
            .ok_or(EngagementDomainError::UnknownApplication {
                job_id: self.job.id(),
                application_id,
            })
    }

    /// Returns the tasker's pending or accepted application, if any.
    #[must_use]
    pub fn live_application_of(&self, tasker_id: UserId) -> Option<&Application> {
        self.applications.iter().find(|application| {
            application.tasker_id() == tasker_id && application.status().is_live()
        })
    }

    /// Returns the taskers currently hired.
    #[must_use]
    pub fn hired_taskers(&self) -> Vec<UserId> {
        self.taskers_with_outcome(ApplicationOutcome::Active)
    }

    /// Returns the taskers who were hired and later resigned.
    #[must_use]
    pub fn resigned_taskers(&self) -> Vec<UserId> {
        self.taskers_with_outcome(ApplicationOutcome::Resigned)
    }

    /// Returns whether `tasker_id` is currently hired.
    #[must_use]
    pub fn is_hired(&self, tasker_id: UserId) -> bool {
        self.hired_taskers().contains(&tasker_id)
    }

    /// Returns whether `tasker_id` worked on the job, even if they later
    /// resigned.
    #[must_use]
    pub fn has_worked(&self, tasker_id: UserId) -> bool {
        self.is_hired(tasker_id) || self.resigned_taskers().contains(&tasker_id)
    }

    /// Groups the applications by outcome.
    #[must_use]
    pub fn roster(&self) -> ApplicationRoster {
        ApplicationRoster::partition(&self.applications)
    }

    /// Reports whether `tasker_id` could apply right now.
    #[must_use]
    pub fn reapplication_status(
        &self,
        tasker_id: UserId,
        cooldown: &ReapplicationCooldown,
        now: DateTime<Utc>,
    ) -> ReapplicationStatus {
        if self.job.status() != JobStatus::Open {
            return ReapplicationStatus::JobClosed;
        }
        if let Some(live) = self.live_application_of(tasker_id) {
            return ReapplicationStatus::LiveApplication {
                application_id: live.id(),
            };
        }
        self.cooldown_remaining(tasker_id, cooldown, now)
            .map_or(ReapplicationStatus::Eligible, |remaining_seconds| {
                ReapplicationStatus::CoolingDown { remaining_seconds }
            })
    }

    /// Returns whole seconds left on the tasker's cooldown, if one is active.
    #[must_use]
    pub fn cooldown_remaining(
        &self,
        tasker_id: UserId,
        cooldown: &ReapplicationCooldown,
        now: DateTime<Utc>,
    ) -> Option<u64> {
        let anchor = self.cooldowns.get(&tasker_id)?;
        cooldown
            .remaining(*anchor, now)
            .map(whole_seconds_ceil)
    }

    /// Drops cooldown anchors whose window has elapsed.
    pub fn purge_elapsed_cooldowns(
        &mut self,
        cooldown: &ReapplicationCooldown,
        now: DateTime<Utc>,
    ) {
        self.cooldowns
            .retain(|_, anchor| !cooldown.has_elapsed(*anchor, now));
    }

    /// Replaces the job details while the job is still open.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-owners and
    /// [`EngagementDomainError::InvalidJobTransition`] once hiring has ended.
    pub fn edit(
        &mut self,
        actor: Actor,
        details: JobDetails,
        clock: &impl Clock,
    ) -> Result<(), EngagementDomainError> {
        self.ensure_owner(actor, LifecycleAction::Edit)?;
        self.ensure_job_open(LifecycleAction::Edit)?;
        self.job.replace_details(details, clock);
        self.record(EventPayload::JobEdited { job_id: self.job.id() }, clock);
        Ok(())
    }

    /// Checks that the job may be deleted and records the deletion event.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-owners,
    /// [`EngagementDomainError::InvalidJobTransition`] once the job left
    /// `open`, and [`EngagementDomainError::HiringStarted`] when a tasker has
    /// already been accepted.
    pub fn delete(
        &mut self,
        actor: Actor,
        clock: &impl Clock,
    ) -> Result<(), EngagementDomainError> {
        self.ensure_owner(actor, LifecycleAction::Delete)?;
        self.ensure_job_open(LifecycleAction::Delete)?;
        if !self.hired_taskers().is_empty() {
            return Err(EngagementDomainError::HiringStarted(self.job.id()));
        }
        self.record(EventPayload::JobDeleted { job_id: self.job.id() }, clock);
        Ok(())
    }

    /// Moves an open job with at least one hire to `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-owners,
    /// [`EngagementDomainError::InvalidJobTransition`] unless the job is
    /// open, and [`EngagementDomainError::NoAcceptedApplication`] when
    /// nobody has been hired.
    pub fn start(&mut self, actor: Actor, clock: &impl Clock) -> Result<(), EngagementDomainError> {
        self.ensure_owner(actor, LifecycleAction::Start)?;
        self.ensure_job_open(LifecycleAction::Start)?;
        let hired = self.hired_taskers();
        if hired.is_empty() {
            return Err(EngagementDomainError::NoAcceptedApplication(self.job.id()));
        }
        self.job
            .transition_to(JobStatus::InProgress, LifecycleAction::Start, clock)?;
        self.record(
            EventPayload::JobStarted {
                job_id: self.job.id(),
                hired,
            },
            clock,
        );
        Ok(())
    }

    /// Moves an in-progress job to `finished` and opens rating obligations.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-owners and
    /// [`EngagementDomainError::InvalidJobTransition`] unless the job is in
    /// progress.
    pub fn finish(
        &mut self,
        actor: Actor,
        clock: &impl Clock,
    ) -> Result<(), EngagementDomainError> {
        self.ensure_owner(actor, LifecycleAction::Finish)?;
        if self.job.status() != JobStatus::InProgress {
            return Err(self.invalid_job_transition(LifecycleAction::Finish));
        }
        self.job
            .transition_to(JobStatus::Finished, LifecycleAction::Finish, clock)?;
        let job_id = self.job.id();
        self.record(EventPayload::JobFinished { job_id }, clock);
        self.record(
            EventPayload::RatingObligationsOpened {
                job_id,
                customer_id: self.job.customer_id(),
                hired: self.hired_taskers(),
                resigned: self.resigned_taskers(),
            },
            clock,
        );
        Ok(())
    }

    /// Cancels an open or in-progress job.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-owners and
    /// [`EngagementDomainError::InvalidJobTransition`] from terminal states.
    pub fn cancel(
        &mut self,
        actor: Actor,
        clock: &impl Clock,
    ) -> Result<(), EngagementDomainError> {
        self.ensure_owner(actor, LifecycleAction::Cancel)?;
        self.job
            .transition_to(JobStatus::Cancelled, LifecycleAction::Cancel, clock)?;
        self.record(EventPayload::JobCancelled { job_id: self.job.id() }, clock);
        Ok(())
    }

    /// Checks that `actor` may apply to a job at all, before the job is
    /// loaded.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-taskers.
    pub const fn ensure_applicant_role(
        job_id: JobId,
        actor: Actor,
    ) -> Result<(), EngagementDomainError> {
        if matches!(actor.role(), Role::Tasker) {
            Ok(())
        } else {
            Err(EngagementDomainError::Forbidden {
                job_id,
                actor,
                action: LifecycleAction::Apply,
            })
        }
    }

    /// Runs every application guard without changing the board.
    ///
    /// Guards run in order: caller role, job open, no live application for
    /// the pair, cooldown elapsed.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-taskers,
    /// [`EngagementDomainError::InvalidJobTransition`] when the job is not
    /// open, [`EngagementDomainError::LiveApplicationExists`] when the tasker
    /// is already pending or hired, and
    /// [`EngagementDomainError::CooldownActive`] during a cooldown.
    pub fn check_apply(
        &self,
        actor: Actor,
        cooldown: &ReapplicationCooldown,
        now: DateTime<Utc>,
    ) -> Result<(), EngagementDomainError> {
        let job_id = self.job.id();
        let tasker_id = actor.user_id();
        Self::ensure_applicant_role(job_id, actor)?;
        self.ensure_job_open(LifecycleAction::Apply)?;
        if let Some(live) = self.live_application_of(tasker_id) {
            return Err(EngagementDomainError::LiveApplicationExists {
                job_id,
                tasker_id,
                application_id: live.id(),
            });
        }
        if let Some(remaining_seconds) = self.cooldown_remaining(tasker_id, cooldown, now) {
            return Err(EngagementDomainError::CooldownActive {
                job_id,
                tasker_id,
                remaining_seconds,
            });
        }
        Ok(())
    }

    /// Submits a new pending application for the calling tasker.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::check_apply`].
    pub fn apply(
        &mut self,
        application_id: ApplicationId,
        actor: Actor,
        cover_letter: Option<String>,
        proposed_budget: Option<Budget>,
        cooldown: &ReapplicationCooldown,
        clock: &impl Clock,
    ) -> Result<&Application, EngagementDomainError> {
        self.check_apply(actor, cooldown, clock.utc())?;
        let job_id = self.job.id();
        let tasker_id = actor.user_id();

        self.cooldowns.remove(&tasker_id);
        self.job.record_application();
        self.applications.push(Application::new(
            application_id,
            job_id,
            tasker_id,
            cover_letter,
            proposed_budget,
            clock,
        ));
        self.record(
            EventPayload::ApplicationSubmitted {
                job_id,
                application_id,
                tasker_id,
            },
            clock,
        );
        self.application(application_id)
    }

    /// Hires a pending applicant while the job is open.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-owners and
    /// [`EngagementDomainError::InvalidApplicationTransition`] when the
    /// application is not pending or the job is not open.
    pub fn accept(
        &mut self,
        application_id: ApplicationId,
        actor: Actor,
        clock: &impl Clock,
    ) -> Result<&Application, EngagementDomainError> {
        self.ensure_owner(actor, ACCEPT.action)?;
        let tasker_id = self.guard_edge(application_id, ACCEPT)?;
        self.application_mut(application_id)?.accept(clock);
        self.record(
            EventPayload::ApplicationAccepted {
                job_id: self.job.id(),
                application_id,
                tasker_id,
            },
            clock,
        );
        self.application(application_id)
    }

    /// Declines a pending applicant while the job is open.
    ///
    /// No cooldown is imposed on the declined tasker.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-owners and
    /// [`EngagementDomainError::InvalidApplicationTransition`] when the
    /// application is not pending or the job is not open.
    pub fn reject(
        &mut self,
        application_id: ApplicationId,
        actor: Actor,
        clock: &impl Clock,
    ) -> Result<&Application, EngagementDomainError> {
        self.ensure_owner(actor, REJECT.action)?;
        let tasker_id = self.guard_edge(application_id, REJECT)?;
        self.application_mut(application_id)?
            .close(REJECT.to, None, clock);
        self.record(
            EventPayload::ApplicationRejected {
                job_id: self.job.id(),
                application_id,
                tasker_id,
            },
            clock,
        );
        self.application(application_id)
    }

    /// Withdraws the caller's own pending application and starts the
    /// reapplication cooldown for the pair.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] unless the caller is the
    /// applying tasker, and
    /// [`EngagementDomainError::InvalidApplicationTransition`] when the
    /// application is not pending or the job is not open.
    pub fn withdraw(
        &mut self,
        application_id: ApplicationId,
        actor: Actor,
        cooldown: &ReapplicationCooldown,
        clock: &impl Clock,
    ) -> Result<&Application, EngagementDomainError> {
        self.ensure_applicant(application_id, actor, WITHDRAW.action)?;
        let tasker_id = self.guard_edge(application_id, WITHDRAW)?;
        self.application_mut(application_id)?
            .close(WITHDRAW.to, None, clock);
        let anchor = clock.utc();
        self.cooldowns.insert(tasker_id, anchor);
        self.record(
            EventPayload::ApplicationWithdrawn {
                job_id: self.job.id(),
                application_id,
                tasker_id,
                reapply_after: anchor + cooldown.window(),
            },
            clock,
        );
        self.application(application_id)
    }

    /// Fires a hired tasker while the job is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] for non-owners,
    /// [`EngagementDomainError::InvalidApplicationTransition`] when the
    /// application is not accepted or the job is not in progress, and
    /// [`EngagementDomainError::MissingReason`] for a blank reason.
    pub fn terminate(
        &mut self,
        application_id: ApplicationId,
        actor: Actor,
        reason: &str,
        clock: &impl Clock,
    ) -> Result<&Application, EngagementDomainError> {
        self.ensure_owner(actor, TERMINATE.action)?;
        let tasker_id = self.guard_edge(application_id, TERMINATE)?;
        let reason_text = required_reason(reason, TERMINATE.action)?;
        self.application_mut(application_id)?.close(
            TERMINATE.to,
            Some(ClosingNote::TerminationReason(reason_text.clone())),
            clock,
        );
        self.record(
            EventPayload::TaskerTerminated {
                job_id: self.job.id(),
                application_id,
                tasker_id,
                reason: reason_text,
            },
            clock,
        );
        self.application(application_id)
    }

    /// Lets a hired tasker leave the job while it is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`EngagementDomainError::Forbidden`] unless the caller is the
    /// hired tasker, [`EngagementDomainError::InvalidApplicationTransition`]
    /// when the application is not accepted or the job is not in progress,
    /// and [`EngagementDomainError::MissingReason`] for a blank reason.
    pub fn resign(
        &mut self,
        application_id: ApplicationId,
        actor: Actor,
        reason: &str,
        clock: &impl Clock,
    ) -> Result<&Application, EngagementDomainError> {
        self.ensure_applicant(application_id, actor, RESIGN.action)?;
        let tasker_id = self.guard_edge(application_id, RESIGN)?;
        let reason_text = required_reason(reason, RESIGN.action)?;
        self.application_mut(application_id)?.close(
            RESIGN.to,
            Some(ClosingNote::ResignationReason(reason_text.clone())),
            clock,
        );
        self.record(
            EventPayload::TaskerResigned {
                job_id: self.job.id(),
                application_id,
                tasker_id,
                reason: reason_text,
            },
            clock,
        );
        self.application(application_id)
    }

    /// Resolves which action moves an application from its current status
    /// to `target`.
    ///
    /// Returns `None` when no edge of the state machine connects the two
    /// statuses.
    #[must_use]
    pub fn action_towards(
        current: ApplicationStatus,
        target: ApplicationStatus,
    ) -> Option<LifecycleAction> {
        EDGES
            .iter()
            .find(|edge| edge.from == current && edge.to == target)
            .map(|edge| edge.action)
    }

    fn taskers_with_outcome(&self, outcome: ApplicationOutcome) -> Vec<UserId> {
        let mut taskers: Vec<UserId> = self
            .applications
            .iter()
            .filter(|application| application.outcome() == outcome)
            .map(Application::tasker_id)
            .collect();
        taskers.sort_unstable();
        taskers.dedup();
        taskers
    }

    fn application_mut(
        &mut self,
        application_id: ApplicationId,
    ) -> Result<&mut Application, EngagementDomainError> {
        let job_id = self.job.id();
        self.applications
            .iter_mut()
            .find(|application| application.id() == application_id)
            .ok_or(EngagementDomainError::UnknownApplication {
                job_id,
                application_id,
            })
    }

    fn ensure_owner(
        &self,
        actor: Actor,
        action: LifecycleAction,
    ) -> Result<(), EngagementDomainError> {
        if actor.owns_or_administers(self.job.customer_id()) {
            return Ok(());
        }
        Err(EngagementDomainError::Forbidden {
            job_id: self.job.id(),
            actor,
            action,
        })
    }

    fn ensure_applicant(
        &self,
        application_id: ApplicationId,
        actor: Actor,
        action: LifecycleAction,
    ) -> Result<(), EngagementDomainError> {
        let application = self.application(application_id)?;
        if actor.role() == Role::Tasker && actor.user_id() == application.tasker_id() {
            return Ok(());
        }
        Err(EngagementDomainError::Forbidden {
            job_id: self.job.id(),
            actor,
            action,
        })
    }

    fn ensure_job_open(&self, action: LifecycleAction) -> Result<(), EngagementDomainError> {
        if self.job.status() == JobStatus::Open {
            return Ok(());
        }
        Err(self.invalid_job_transition(action))
    }

    const fn invalid_job_transition(&self, action: LifecycleAction) -> EngagementDomainError {
        EngagementDomainError::InvalidJobTransition {
            job_id: self.job.id(),
            status: self.job.status(),
            action,
        }
    }

    /// Checks the edge's source status and required job status, returning
    /// the application's tasker.
    fn guard_edge(
        &self,
        application_id: ApplicationId,
        edge: Edge,
    ) -> Result<UserId, EngagementDomainError> {
        let application = self.application(application_id)?;
        let job_status = self.job.status();
        if application.status() != edge.from || job_status != edge.job_status {
            return Err(EngagementDomainError::InvalidApplicationTransition {
                application_id,
                status: application.status(),
                job_status,
                action: edge.action,
            });
        }
        Ok(application.tasker_id())
    }

    fn record(&mut self, payload: EventPayload, clock: &impl Clock) {
        self.events.push(DomainEvent::new(payload, clock));
    }
}

fn required_reason(reason: &str, action: LifecycleAction) -> Result<String, EngagementDomainError> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(EngagementDomainError::MissingReason(action));
    }
    Ok(trimmed.to_owned())
}
