//! Membership entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::ClubRole;

/// The durable record granting a user a role within a club.
///
/// Keyed by `(club_id, user_id)`; the pair appears in at most one of
/// {membership, ban, pending join request} at any instant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Membership {
    /// The club this membership belongs to.
    pub club_id: Uuid,
    /// The member's user ID.
    pub user_id: Uuid,
    /// The member's role in the club.
    pub role: ClubRole,
    /// When the user joined the club.
    pub joined_at: DateTime<Utc>,
}
