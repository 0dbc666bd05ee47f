//! Ban registry domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to ban registry operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BanEvent {
    /// A user was banned from a club.
    Created {
        /// The ban ID.
        ban_id: Uuid,
        /// The club ID.
        club_id: Uuid,
        /// The banned user's ID.
        user_id: Uuid,
        /// The issuing actor's ID.
        banned_by: Uuid,
        /// Whether an existing membership was removed by the ban.
        membership_removed: bool,
    },
    /// A ban was lifted.
    Removed {
        /// The club ID.
        club_id: Uuid,
        /// The unbanned user's ID.
        user_id: Uuid,
    },
}
