//! Engagement: the job engagement lifecycle engine of a task marketplace.
//!
//! Customers post jobs, taskers apply, customers hire, and both sides rate
//! each other once the work is done. This crate owns the rules that govern
//! that flow and nothing else: presentation, payments and notification
//! delivery live elsewhere.
//!
//! # Architecture
//!
//! The engine follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`engagement`]: Job and application state machines, reapplication
//!   cooldown and match ranking
//! - [`rating`]: Post-completion review obligations
//! - [`identity`]: Resolution of callers into user and role
//! - [`events`]: Domain events handed to an external notifier
//! - [`transport`]: Typed requests and the canonical response envelope
//! - [`config`] and [`telemetry`]: Environment settings and logging
//! - [`clock`]: A settable clock for simulated time

pub mod clock;
pub mod config;
pub mod engagement;
pub mod events;
pub mod identity;
pub mod rating;
pub mod telemetry;
pub mod transport;
