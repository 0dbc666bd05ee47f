//! Join request domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to the join request lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JoinRequestEvent {
    /// A join request entered the pending state.
    Created {
        /// The request ID.
        request_id: Uuid,
        /// The club ID.
        club_id: Uuid,
        /// The requesting user's ID.
        user_id: Uuid,
    },
    /// A pending request was approved and a membership created.
    Approved {
        /// The request ID.
        request_id: Uuid,
        /// The club ID.
        club_id: Uuid,
        /// The requesting user's ID.
        user_id: Uuid,
        /// The approving actor's ID.
        approved_by: Uuid,
    },
    /// A pending request was rejected.
    Rejected {
        /// The request ID.
        request_id: Uuid,
        /// The club ID.
        club_id: Uuid,
        /// The requesting user's ID.
        user_id: Uuid,
        /// The rejecting actor's ID.
        rejected_by: Uuid,
    },
}
