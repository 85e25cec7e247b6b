//! Port contracts for review persistence.

mod repository;

pub use repository::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult};
