//! In-memory session table.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Actor, SessionToken},
    ports::{IdentityError, IdentityResolver, IdentityResult},
};

/// Thread-safe in-memory mapping from session tokens to actors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityResolver {
    sessions: Arc<RwLock<HashMap<SessionToken, Actor>>>,
}

impl InMemoryIdentityResolver {
    /// Creates an empty session table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `actor` behind `token`, replacing any earlier mapping.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unavailable`] if the session lock is poisoned.
    pub fn sign_in(&self, token: SessionToken, actor: Actor) -> IdentityResult<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|err| IdentityError::unavailable(std::io::Error::other(err.to_string())))?;
        sessions.insert(token, actor);
        Ok(())
    }
}

#[async_trait]
impl IdentityResolver for InMemoryIdentityResolver {
    async fn resolve(&self, token: &SessionToken) -> IdentityResult<Actor> {
        let sessions = self
            .sessions
            .read()
            .map_err(|err| IdentityError::unavailable(std::io::Error::other(err.to_string())))?;
        sessions
            .get(token)
            .copied()
            .ok_or(IdentityError::UnknownSession)
    }
}
