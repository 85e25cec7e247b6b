//! Unit tests for the job and application status tables.

use crate::engagement::domain::{ApplicationStatus, JobBoard, JobStatus, LifecycleAction};
use rstest::rstest;

const ALL_JOB_STATUSES: [JobStatus; 4] = [
    JobStatus::Open,
    JobStatus::InProgress,
    JobStatus::Finished,
    JobStatus::Cancelled,
];

#[rstest]
#[case(JobStatus::Open, JobStatus::InProgress, true)]
#[case(JobStatus::Open, JobStatus::Cancelled, true)]
#[case(JobStatus::Open, JobStatus::Finished, false)]
#[case(JobStatus::Open, JobStatus::Open, false)]
#[case(JobStatus::InProgress, JobStatus::Finished, true)]
#[case(JobStatus::InProgress, JobStatus::Cancelled, true)]
#[case(JobStatus::InProgress, JobStatus::Open, false)]
#[case(JobStatus::InProgress, JobStatus::InProgress, false)]
fn can_transition_to_returns_expected(
    #[case] from: JobStatus,
    #[case] to: JobStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(JobStatus::Finished)]
#[case(JobStatus::Cancelled)]
fn terminal_statuses_never_move(#[case] terminal: JobStatus) {
    assert!(terminal.is_terminal());
    for target in ALL_JOB_STATUSES {
        assert!(!terminal.can_transition_to(target), "{terminal} -> {target}");
    }
}

#[rstest]
#[case("open", JobStatus::Open)]
#[case(" In_Progress ", JobStatus::InProgress)]
#[case("finished", JobStatus::Finished)]
#[case("cancelled", JobStatus::Cancelled)]
fn job_status_parses_storage_values(#[case] raw: &str, #[case] expected: JobStatus) {
    assert_eq!(JobStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn unknown_job_status_is_rejected() {
    assert!(JobStatus::try_from("archived").is_err());
}

#[rstest]
#[case(ApplicationStatus::Pending, true)]
#[case(ApplicationStatus::Accepted, true)]
#[case(ApplicationStatus::Rejected, false)]
#[case(ApplicationStatus::Withdrawn, false)]
fn only_pending_and_accepted_are_live(#[case] status: ApplicationStatus, #[case] live: bool) {
    assert_eq!(status.is_live(), live);
    assert_eq!(status.is_terminal(), !live);
}

#[rstest]
#[case(ApplicationStatus::Pending, ApplicationStatus::Accepted, Some(LifecycleAction::Accept))]
#[case(ApplicationStatus::Pending, ApplicationStatus::Rejected, Some(LifecycleAction::Reject))]
#[case(ApplicationStatus::Pending, ApplicationStatus::Withdrawn, Some(LifecycleAction::Withdraw))]
#[case(ApplicationStatus::Accepted, ApplicationStatus::Rejected, Some(LifecycleAction::Terminate))]
#[case(ApplicationStatus::Accepted, ApplicationStatus::Withdrawn, Some(LifecycleAction::Resign))]
#[case(ApplicationStatus::Accepted, ApplicationStatus::Pending, None)]
#[case(ApplicationStatus::Rejected, ApplicationStatus::Accepted, None)]
#[case(ApplicationStatus::Withdrawn, ApplicationStatus::Pending, None)]
#[case(ApplicationStatus::Pending, ApplicationStatus::Pending, None)]
fn action_towards_follows_the_edge_table(
    #[case] current: ApplicationStatus,
    #[case] target: ApplicationStatus,
    #[case] expected: Option<LifecycleAction>,
) {
    assert_eq!(JobBoard::action_towards(current, target), expected);
}
