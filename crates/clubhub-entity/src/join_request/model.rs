//! Join request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::JoinRequestStatus;

/// A user-initiated, admin-gated application for membership in a
/// non-auto-approving club.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JoinRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The club being applied to.
    pub club_id: Uuid,
    /// The applying user's ID.
    pub user_id: Uuid,
    /// Current lifecycle status.
    pub status: JoinRequestStatus,
    /// A personal message to the club admins (optional).
    pub message: Option<String>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}
