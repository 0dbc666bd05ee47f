//! Club visibility enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visibility of a club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "club_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClubVisibility {
    /// Anyone can see the club and request to join.
    Public,
    /// The club is joinable only via invite code.
    Private,
}

impl ClubVisibility {
    /// Return the visibility as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for ClubVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClubVisibility {
    type Err = clubhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(clubhub_core::AppError::validation(format!(
                "Invalid club visibility: '{s}'. Expected one of: public, private"
            ))),
        }
    }
}
