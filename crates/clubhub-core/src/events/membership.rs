//! Membership-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to membership mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MembershipEvent {
    /// A membership was created.
    Created {
        /// The club ID.
        club_id: Uuid,
        /// The new member's user ID.
        user_id: Uuid,
        /// The granted role.
        role: String,
        /// The channel that granted it (`"owner"`, `"invite_code"`,
        /// `"join_request"`, `"auto_approve"`).
        via: String,
    },
    /// A membership was removed.
    Removed {
        /// The club ID.
        club_id: Uuid,
        /// The removed member's user ID.
        user_id: Uuid,
        /// Whether the member removed themself.
        self_leave: bool,
    },
    /// A member's role changed between `member` and `admin`.
    RoleChanged {
        /// The club ID.
        club_id: Uuid,
        /// The member's user ID.
        user_id: Uuid,
        /// The previous role.
        old_role: String,
        /// The new role.
        new_role: String,
    },
    /// Club ownership was transferred.
    OwnershipTransferred {
        /// The club ID.
        club_id: Uuid,
        /// The outgoing owner (now admin).
        previous_owner_id: Uuid,
        /// The incoming owner.
        new_owner_id: Uuid,
    },
}
