//! Port contract for resolving callers.

use super::domain::{Actor, SessionToken};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity resolution.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Resolves a session credential into the acting user and role.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves the caller behind `token`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::UnknownSession`] when the credential does not
    /// map to a user, or [`IdentityError::Unavailable`] when the identity
    /// service cannot be reached.
    async fn resolve(&self, token: &SessionToken) -> IdentityResult<Actor>;
}

/// Errors returned by identity resolvers.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The session credential is not recognised.
    #[error("unknown or expired session")]
    UnknownSession,

    /// The identity service failed.
    #[error("identity service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps an identity service failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
