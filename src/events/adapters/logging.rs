//! Publisher that writes events to the tracing subscriber.

use async_trait::async_trait;
use tracing::info;

use crate::events::{
    domain::DomainEvent,
    ports::{EventPublishError, EventPublisher},
};

/// Emits one structured log record per event.
///
/// Useful when no notification service is wired up: the event stream stays
/// visible in the service logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventPublisher;

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, events: &[DomainEvent]) -> Result<(), EventPublishError> {
        for event in events {
            let payload =
                serde_json::to_string(event.payload()).map_err(EventPublishError::new)?;
            info!(
                event_id = %event.id(),
                event_type = event.event_type(),
                occurred_at = %event.occurred_at(),
                %payload,
                "domain event"
            );
        }
        Ok(())
    }
}
