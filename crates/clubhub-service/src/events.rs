//! Post-commit event dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use clubhub_core::events::{DomainEvent, EventPayload};
use clubhub_core::result::AppResult;
use clubhub_core::traits::EventPublisher;

/// Publish an event after a successful commit, best-effort.
///
/// A failed publish is logged and swallowed; the committed operation is
/// never rolled back on account of notification delivery.
pub(crate) async fn emit(
    publisher: &Arc<dyn EventPublisher>,
    actor_id: Option<Uuid>,
    payload: EventPayload,
) {
    let event = DomainEvent::new(actor_id, payload);
    if let Err(e) = publisher.publish(event).await {
        warn!(error = %e, "Failed to publish domain event");
    }
}

/// Event publisher that discards every event.
///
/// Useful for wiring the engine without a notification collaborator and
/// in tests.
#[derive(Debug, Clone, Default)]
pub struct NullEventPublisher;

#[async_trait]
impl EventPublisher for NullEventPublisher {
    async fn publish(&self, _event: DomainEvent) -> AppResult<()> {
        Ok(())
    }
}
