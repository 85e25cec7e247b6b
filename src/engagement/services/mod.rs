//! Application services for job engagement orchestration.

mod applications;
mod commit;
mod error;
mod jobs;
mod ranking;

pub use applications::{ApplicationLifecycleService, ApplyRequest, TransitionApplicationRequest};
pub use error::{EngagementServiceError, EngagementServiceResult};
pub use jobs::{JobDetailsRequest, JobLifecycleService};
pub use ranking::{MatchRankingService, RankedApplication};
