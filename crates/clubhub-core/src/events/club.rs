//! Club lifecycle domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to club lifecycle operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClubEvent {
    /// A new club was created.
    Created {
        /// The club ID.
        club_id: Uuid,
        /// The club name.
        name: String,
        /// The owning user's ID.
        owner_id: Uuid,
    },
    /// Club settings were updated.
    Updated {
        /// The club ID.
        club_id: Uuid,
        /// Fields that changed.
        changed_fields: Vec<String>,
    },
    /// A club was archived.
    Archived {
        /// The club ID.
        club_id: Uuid,
    },
    /// The club's invite code was regenerated.
    InviteCodeRegenerated {
        /// The club ID.
        club_id: Uuid,
    },
}
