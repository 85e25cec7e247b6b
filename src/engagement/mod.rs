//! Job and application lifecycle management.
//!
//! A job and every application submitted against it form one consistency
//! boundary, the [`domain::JobBoard`]. Job transitions (start, finish,
//! cancel), application transitions (apply, accept, reject, withdraw,
//! terminate, resign) and the reapplication cooldown are all validated
//! against a single loaded board and persisted with an optimistic version
//! check. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
