//! Outbound notification boundary.

use async_trait::async_trait;

use crate::events::DomainEvent;
use crate::result::AppResult;

/// Fire-and-forget event sink consumed by the notification collaborator.
///
/// Services publish events only after a successful commit; a failed
/// publish is logged and never rolls back the committed operation.
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publish a single domain event.
    async fn publish(&self, event: DomainEvent) -> AppResult<()>;
}
