//! `PostgreSQL` adapters for review persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresReviewRepository;
