//! Event publisher port.

use crate::todo::domain::TodoEvent;
use async_trait::async_trait;
use thiserror::Error;

/// Sink for domain events.
///
/// Callers never fail a command because publishing failed; errors are
/// logged and dropped.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes events in order.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the sink rejects the batch.
    async fn publish(&self, events: &[TodoEvent]) -> Result<(), PublishError>;
}

/// Error returned by event publishers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("event publishing failed: {0}")]
pub struct PublishError(pub String);
