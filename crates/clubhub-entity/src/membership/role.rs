//! Club role enumeration.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Roles a member can hold within a club.
///
/// Roles are ordered by authority: Owner > Admin > Member. Exactly one
/// member per club holds `Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "club_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClubRole {
    /// Regular member.
    Member,
    /// Can manage members, bans, and join requests.
    Admin,
    /// The single top-rank role; subject to the no-orphan invariant.
    Owner,
}

impl ClubRole {
    /// Return the authority rank (higher = more authority).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Owner => 3,
            Self::Admin => 2,
            Self::Member => 1,
        }
    }

    /// Check whether this role may manage a member holding `target`.
    ///
    /// True only when this role is strictly higher in the ordering; a role
    /// never manages itself or a higher role.
    pub fn can_manage(&self, target: &ClubRole) -> bool {
        self.rank() > target.rank()
    }

    /// Check if this role is the owner role.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }
}

impl PartialOrd for ClubRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClubRole {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for ClubRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClubRole {
    type Err = clubhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            _ => Err(clubhub_core::AppError::validation(format!(
                "Invalid club role: '{s}'. Expected one of: member, admin, owner"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(ClubRole::Member < ClubRole::Admin);
        assert!(ClubRole::Admin < ClubRole::Owner);
        assert_eq!(ClubRole::Admin.cmp(&ClubRole::Admin), Ordering::Equal);
    }

    #[test]
    fn test_can_manage_is_strict() {
        assert!(ClubRole::Owner.can_manage(&ClubRole::Admin));
        assert!(ClubRole::Owner.can_manage(&ClubRole::Member));
        assert!(ClubRole::Admin.can_manage(&ClubRole::Member));
        // Never itself or higher.
        assert!(!ClubRole::Admin.can_manage(&ClubRole::Admin));
        assert!(!ClubRole::Admin.can_manage(&ClubRole::Owner));
        assert!(!ClubRole::Owner.can_manage(&ClubRole::Owner));
        assert!(!ClubRole::Member.can_manage(&ClubRole::Member));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("owner".parse::<ClubRole>().unwrap(), ClubRole::Owner);
        assert_eq!("ADMIN".parse::<ClubRole>().unwrap(), ClubRole::Admin);
        assert!("superuser".parse::<ClubRole>().is_err());
    }
}
