//! Port contract for relaying domain events.

use super::domain::DomainEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Delivers domain events to an out-of-band notification channel.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes events in the order they occurred.
    ///
    /// # Errors
    ///
    /// Returns [`EventPublishError`] when the channel rejects the batch.
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), EventPublishError>;
}

/// Errors returned by event publishers.
#[derive(Debug, Clone, Error)]
#[error("event publishing failed: {0}")]
pub struct EventPublishError(pub Arc<dyn std::error::Error + Send + Sync>);

impl EventPublishError {
    /// Wraps a channel failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
