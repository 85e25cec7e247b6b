//! Domain events emitted by the engagement engine.
//!
//! The engine does not deliver notifications itself. Every successful
//! lifecycle transition produces a [`domain::DomainEvent`] that is handed to
//! an [`ports::EventPublisher`] after the change has been persisted, so an
//! external notification service can relay it.

pub mod adapters;
pub mod domain;
pub mod ports;
