//! Caller identity for the engagement engine.
//!
//! Every lifecycle operation is performed on behalf of an [`domain::Actor`]:
//! a user identifier paired with the marketplace role that user holds.
//! Resolving a session into an actor is the job of an external identity
//! service, modelled here by the [`ports::IdentityResolver`] port.

pub mod adapters;
pub mod domain;
pub mod ports;
