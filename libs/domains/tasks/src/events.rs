//! Task-created notifications.

use async_trait::async_trait;
use messaging::{EventPublisher, MessagingError, PublishOutcome};

use crate::models::TaskCreatedEvent;

/// Where the workflow hands task-created events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskEventPublisher: Send + Sync {
    /// Returns `Unavailable` without sending when the broker channel is not
    /// ready. An error means a send failed on a ready channel.
    async fn publish_task_created(
        &self,
        event: &TaskCreatedEvent,
    ) -> Result<PublishOutcome, MessagingError>;
}

#[async_trait]
impl TaskEventPublisher for EventPublisher {
    async fn publish_task_created(
        &self,
        event: &TaskCreatedEvent,
    ) -> Result<PublishOutcome, MessagingError> {
        self.publish(event).await
    }
}
