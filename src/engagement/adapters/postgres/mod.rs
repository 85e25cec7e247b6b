//! `PostgreSQL` adapters for job board persistence.

mod models;
mod pool;
mod repository;
mod schema;

pub use pool::{PoolSetupError, connect_pool};
pub use repository::{EngagementPgPool, PostgresEngagementRepository};
