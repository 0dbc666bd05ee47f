//! Domain events emitted by ClubHub operations.
//!
//! Events are dispatched to the notification collaborator after a
//! successful commit, outside the transactional boundary. Delivery is
//! best-effort and never part of the engine's consistency guarantees.

pub mod ban;
pub mod club;
pub mod join_request;
pub mod membership;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use ban::BanEvent;
pub use club::ClubEvent;
pub use join_request::JoinRequestEvent;
pub use membership::MembershipEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<Uuid>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A club lifecycle event.
    Club(ClubEvent),
    /// A membership event.
    Membership(MembershipEvent),
    /// A join request event.
    JoinRequest(JoinRequestEvent),
    /// A ban event.
    Ban(BanEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<Uuid>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}
