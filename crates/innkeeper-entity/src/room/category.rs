//! Room category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Room category. The declaration order is the display ordering used by
/// availability listings (and matches the Postgres enum ordering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// One guest.
    Single,
    /// Two guests.
    Double,
    /// Family room for up to four guests.
    Family,
    /// Top-tier suite.
    Suite,
}

impl RoomType {
    /// Return the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Family => "family",
            Self::Suite => "suite",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = innkeeper_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "family" => Ok(Self::Family),
            "suite" => Ok(Self::Suite),
            _ => Err(innkeeper_core::AppError::validation(format!(
                "Invalid room type: '{s}'. Expected one of: single, double, family, suite"
            ))),
        }
    }
}
