//! Post-completion rating obligations.
//!
//! Once a job is finished the customer owes one review of every tasker
//! still hired, and every tasker who worked the job (including those who
//! resigned) owes one review of the customer. Each review may be edited at
//! most once. The module follows hexagonal architecture:
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
