//! Reapplication cooldown arithmetic.
//!
//! Withdrawing a pending application records an anchor timestamp for the
//! `(job, tasker)` pair. Until the configured window has elapsed from that
//! anchor, the tasker cannot apply to the same job again. Anchors are
//! disposable once elapsed.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// The reapplication window applied after a self-withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReapplicationCooldown {
    window: TimeDelta,
}

impl ReapplicationCooldown {
    /// Creates a cooldown lasting `window`.
    #[must_use]
    pub const fn new(window: TimeDelta) -> Self {
        Self { window }
    }

    /// Creates a cooldown from whole seconds.
    ///
    /// Returns `None` when `seconds` cannot be represented as a duration.
    #[must_use]
    pub fn from_secs(seconds: u64) -> Option<Self> {
        let signed = i64::try_from(seconds).ok()?;
        TimeDelta::new(signed, 0).map(Self::new)
    }

    /// Returns the window length.
    #[must_use]
    pub const fn window(&self) -> TimeDelta {
        self.window
    }

    /// Returns the time left before reapplication is allowed, or `None` once
    /// the window has elapsed.
    #[must_use]
    pub fn remaining(&self, anchor: DateTime<Utc>, now: DateTime<Utc>) -> Option<TimeDelta> {
        let elapsed = now.signed_duration_since(anchor);
        let remaining = self.window.checked_sub(&elapsed)?;
        (remaining > TimeDelta::zero()).then_some(remaining)
    }

    /// Returns whether the window starting at `anchor` has elapsed.
    #[must_use]
    pub fn has_elapsed(&self, anchor: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.remaining(anchor, now).is_none()
    }
}

impl Default for ReapplicationCooldown {
    fn default() -> Self {
        Self::new(TimeDelta::hours(1))
    }
}

/// Rounds a positive duration up to whole seconds for display.
#[must_use]
pub fn whole_seconds_ceil(duration: TimeDelta) -> u64 {
    let seconds = u64::try_from(duration.num_seconds()).unwrap_or(0);
    if duration.subsec_nanos() > 0 {
        seconds.saturating_add(1)
    } else {
        seconds
    }
}

/// Whether a tasker may apply to a job right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ReapplicationStatus {
    /// A new application would be accepted.
    Eligible,
    /// The job no longer takes applications.
    JobClosed,
    /// The tasker already holds a pending or accepted application.
    LiveApplication {
        /// The blocking application.
        application_id: super::ApplicationId,
    },
    /// The tasker withdrew recently and must wait.
    CoolingDown {
        /// Whole seconds until reapplication is allowed.
        remaining_seconds: u64,
    },
}
