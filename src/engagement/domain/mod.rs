//! Domain model for job engagement.
//!
//! Jobs, applications and reapplication cooldowns are pure values; the
//! [`JobBoard`] aggregate enforces every lifecycle guard and records the
//! resulting domain events. No infrastructure concerns cross this boundary.

mod action;
mod application;
mod board;
mod cooldown;
mod error;
mod ids;
mod job;
mod roster;

pub use action::LifecycleAction;
pub use application::{
    Application, ApplicationOutcome, ApplicationStatus, ClosingNote, PersistedApplicationData,
};
pub use board::{JobBoard, PersistedBoardData};
pub use cooldown::{ReapplicationCooldown, ReapplicationStatus, whole_seconds_ceil};
pub use error::{EngagementDomainError, ParseApplicationStatusError, ParseJobStatusError};
pub use ids::{ApplicationId, JobId};
pub use job::{Budget, Job, JobDetails, JobStatus, PersistedJobData};
pub use roster::ApplicationRoster;
