//! Recording publisher used by tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::events::{
    domain::DomainEvent,
    ports::{EventPublishError, EventPublisher},
};

/// Thread-safe publisher that keeps every event it receives.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventPublisher {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl InMemoryEventPublisher {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded event in publication order.
    ///
    /// A poisoned lock yields the events recorded before the panic.
    #[must_use]
    pub fn published(&self) -> Vec<DomainEvent> {
        self.events
            .read()
            .map_or_else(|poisoned| poisoned.into_inner().clone(), |events| events.clone())
    }

    /// Returns the type names of every recorded event.
    #[must_use]
    pub fn published_types(&self) -> Vec<&'static str> {
        self.published()
            .iter()
            .map(DomainEvent::event_type)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), EventPublishError> {
        let mut recorded = self
            .events
            .write()
            .map_err(|err| EventPublishError::new(std::io::Error::other(err.to_string())))?;
        recorded.extend_from_slice(events);
        Ok(())
    }
}
