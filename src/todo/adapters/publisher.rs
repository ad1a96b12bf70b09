//! Event publisher implementations.

use crate::todo::{
    domain::TodoEvent,
    ports::{EventPublisher, PublishError},
};
use async_trait::async_trait;

/// Publisher that records each event as a structured `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: &[TodoEvent]) -> Result<(), PublishError> {
        for event in events {
            tracing::info!(
                event = event.name(),
                todo_id = %event.todo_id(),
                occurred_at = %event.occurred_at().to_rfc3339(),
                "todo event"
            );
        }
        Ok(())
    }
}

/// Publisher that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, _events: &[TodoEvent]) -> Result<(), PublishError> {
        Ok(())
    }
}
