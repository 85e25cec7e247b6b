//! Request/response boundary of the engine.
//!
//! Requests are decoded once into typed DTOs and every operation answers with
//! the same [`Envelope`]: `{"ok": true, "data": ...}` on success or
//! `{"ok": false, "error": {"code", "message", "cooldownRemainingSeconds"?}}`
//! on failure. Callers never need to sniff response shapes.

mod api;
mod dto;
mod envelope;
mod error;

pub use api::EngagementApi;
pub use dto::{ApplicationPatch, NewApplication, NewJob, NewReview, ReviewPatch};
pub use envelope::Envelope;
pub use error::{ErrorBody, ErrorCode};
