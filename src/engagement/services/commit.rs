//! Shared load/save plumbing for board transitions.

use super::{EngagementServiceError, EngagementServiceResult};
use crate::engagement::{
    domain::{ApplicationId, JobBoard, JobId},
    ports::EngagementRepository,
};
use crate::events::ports::EventPublisher;
use tracing::warn;

/// Loads a board or reports the job as missing.
pub(super) async fn load_board<R>(
    repository: &R,
    job_id: JobId,
) -> EngagementServiceResult<JobBoard>
where
    R: EngagementRepository + ?Sized,
{
    repository
        .load_board(job_id)
        .await?
        .ok_or(EngagementServiceError::JobNotFound(job_id))
}

/// Loads the board owning an application or reports the application as
/// missing.
pub(super) async fn load_board_of_application<R>(
    repository: &R,
    application_id: ApplicationId,
) -> EngagementServiceResult<JobBoard>
where
    R: EngagementRepository + ?Sized,
{
    let job_id = repository
        .find_job_of_application(application_id)
        .await?
        .ok_or(EngagementServiceError::ApplicationNotFound(application_id))?;
    load_board(repository, job_id).await
}

/// Saves a mutated board, then relays its recorded events.
///
/// Publishing happens only after the save succeeded. A publishing failure is
/// logged and does not undo the transition.
pub(super) async fn commit<R, P>(
    repository: &R,
    publisher: &P,
    board: &mut JobBoard,
) -> EngagementServiceResult<()>
where
    R: EngagementRepository + ?Sized,
    P: EventPublisher + ?Sized,
{
    repository.save_board(board).await?;
    publish(publisher, board).await;
    Ok(())
}

/// Relays the board's recorded events without failing the caller.
pub(super) async fn publish<P>(publisher: &P, board: &mut JobBoard)
where
    P: EventPublisher + ?Sized,
{
    let events = board.take_events();
    if events.is_empty() {
        return;
    }
    if let Err(err) = publisher.publish(&events).await {
        warn!(
            job_id = %board.job().id(),
            %err,
            count = events.len(),
            "failed to publish domain events"
        );
    }
}
