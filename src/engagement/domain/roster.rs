//! Partitioned view of a job's applications.

use super::{Application, ApplicationOutcome};
use serde::{Deserialize, Serialize};

/// A job's applications grouped by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRoster {
    /// Awaiting the owner's decision.
    pub pending: Vec<Application>,
    /// Hired and still engaged.
    pub active: Vec<Application>,
    /// Declined before being hired.
    pub rejected: Vec<Application>,
    /// Hired, then terminated.
    pub fired: Vec<Application>,
    /// Withdrawn before being hired.
    pub cancelled: Vec<Application>,
    /// Hired, then resigned.
    pub resigned: Vec<Application>,
}

impl ApplicationRoster {
    /// Groups `applications` by [`Application::outcome`], preserving order.
    #[must_use]
    pub fn partition<'a>(applications: impl IntoIterator<Item = &'a Application>) -> Self {
        let mut roster = Self::default();
        for application in applications {
            let bucket = match application.outcome() {
                ApplicationOutcome::Pending => &mut roster.pending,
                ApplicationOutcome::Active => &mut roster.active,
                ApplicationOutcome::Rejected => &mut roster.rejected,
                ApplicationOutcome::Fired => &mut roster.fired,
                ApplicationOutcome::Cancelled => &mut roster.cancelled,
                ApplicationOutcome::Resigned => &mut roster.resigned,
            };
            bucket.push(application.clone());
        }
        roster
    }

    /// Returns the number of currently hired taskers.
    #[must_use]
    pub fn hired_count(&self) -> usize {
        self.active.len()
    }
}
