//! Ban entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An exclusion record preventing (re-)membership for a user in a club.
///
/// While a ban exists for `(club_id, user_id)`, neither a membership nor a
/// join request can be created for the pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ban {
    /// Unique ban identifier.
    pub id: Uuid,
    /// The club the user is banned from.
    pub club_id: Uuid,
    /// The banned user's ID.
    pub user_id: Uuid,
    /// The admin or owner who issued the ban.
    pub banned_by: Uuid,
    /// Reason for the ban (optional).
    pub reason: Option<String>,
    /// When the ban was issued.
    pub created_at: DateTime<Utc>,
}
