//! Club entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use clubhub_core::{AppError, AppResult};

use super::visibility::ClubVisibility;

/// Minimum club name length.
pub const MIN_NAME_LEN: usize = 3;
/// Maximum club name length.
pub const MAX_NAME_LEN: usize = 100;

/// A club and its membership settings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Club {
    /// Unique club identifier.
    pub id: Uuid,
    /// Club name (unique, case-insensitive).
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Public or private.
    pub visibility: ClubVisibility,
    /// Whether join requests are approved without review.
    pub auto_approve: bool,
    /// Whether regular members may share the invite code.
    pub member_invites_allowed: bool,
    /// Optional member cap; never below the current member count.
    pub max_members: Option<i32>,
    /// Whether the club appears in the public directory.
    pub listed_in_directory: bool,
    /// Whether the club is archived (read-only).
    pub is_archived: bool,
    /// The current owner's user ID.
    pub owner_id: Uuid,
    /// The single live invite code, if one has been generated.
    #[serde(skip_serializing, default)]
    pub invite_code: Option<String>,
    /// Denormalized member count, maintained by membership transitions.
    pub member_count: i32,
    /// When the club was created.
    pub created_at: DateTime<Utc>,
    /// When the club was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Club {
    /// Check whether the club has reached its member cap.
    pub fn is_full(&self) -> bool {
        self.max_members
            .is_some_and(|cap| self.member_count >= cap)
    }

    /// Validate a club name against the length rules.
    pub fn validate_name(name: &str) -> AppResult<()> {
        let len = name.trim().chars().count();
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
            return Err(AppError::validation(format!(
                "Club name must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// Data required to create a new club.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClub {
    /// Desired club name.
    pub name: String,
    /// Description (optional).
    pub description: Option<String>,
    /// Visibility.
    pub visibility: ClubVisibility,
    /// Auto-approve join requests.
    pub auto_approve: bool,
    /// Allow regular members to share the invite code.
    pub member_invites_allowed: bool,
    /// Member cap (None = unlimited).
    pub max_members: Option<i32>,
    /// List in the public directory.
    pub listed_in_directory: bool,
}

/// Partial update for club settings.
///
/// Double-`Option` fields distinguish "leave unchanged" from "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClubPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New visibility.
    pub visibility: Option<ClubVisibility>,
    /// New auto-approve setting.
    pub auto_approve: Option<bool>,
    /// New member-invite setting.
    pub member_invites_allowed: Option<bool>,
    /// New member cap.
    pub max_members: Option<Option<i32>>,
    /// New directory listing setting.
    pub listed_in_directory: Option<bool>,
}

impl ClubPatch {
    /// Names of the fields this patch would change, for event payloads.
    pub fn changed_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name".to_string());
        }
        if self.description.is_some() {
            fields.push("description".to_string());
        }
        if self.visibility.is_some() {
            fields.push("visibility".to_string());
        }
        if self.auto_approve.is_some() {
            fields.push("auto_approve".to_string());
        }
        if self.member_invites_allowed.is_some() {
            fields.push("member_invites_allowed".to_string());
        }
        if self.max_members.is_some() {
            fields.push("max_members".to_string());
        }
        if self.listed_in_directory.is_some() {
            fields.push("listed_in_directory".to_string());
        }
        fields
    }
}
