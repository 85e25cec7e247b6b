//! Connection pool construction from engine settings.

use super::EngagementPgPool;
use crate::config::{ConfigError, EngineConfig};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// Errors raised while opening the `PostgreSQL` pool.
#[derive(Debug, Error)]
pub enum PoolSetupError {
    /// The settings carry no database URL.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The pool could not open its initial connections.
    #[error("failed to open PostgreSQL pool: {0}")]
    Pool(#[from] PoolError),
}

/// Opens a connection pool shared by the job board and review repositories.
///
/// # Errors
///
/// Returns [`PoolSetupError::Config`] when no database URL is configured and
/// [`PoolSetupError::Pool`] when the database cannot be reached.
pub fn connect_pool(config: &EngineConfig) -> Result<EngagementPgPool, PoolSetupError> {
    let url = config.require_database_url()?;
    let manager = ConnectionManager::<PgConnection>::new(url);
    Ok(Pool::builder().build(manager)?)
}
