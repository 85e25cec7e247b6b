//! Named lifecycle actions used in guard errors and audit logging.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation a caller attempts on a job or one of its applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    /// Post a new job.
    Post,
    /// Change a job's details.
    Edit,
    /// Remove an open job.
    Delete,
    /// Move a job from open to in progress.
    Start,
    /// Move a job from in progress to finished.
    Finish,
    /// Cancel an open or in-progress job.
    Cancel,
    /// Submit an application.
    Apply,
    /// Hire a pending applicant.
    Accept,
    /// Decline a pending applicant.
    Reject,
    /// Withdraw one's own pending application.
    Withdraw,
    /// Fire a hired tasker during the job.
    Terminate,
    /// Leave a job one was hired for.
    Resign,
}

impl LifecycleAction {
    /// Returns the verb used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Start => "start",
            Self::Finish => "finish",
            Self::Cancel => "cancel",
            Self::Apply => "apply",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Withdraw => "withdraw",
            Self::Terminate => "terminate",
            Self::Resign => "resign",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
