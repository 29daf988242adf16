//! Guest directory model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A guest in the hotel's directory.
///
/// Reservations carry their own copy of the contact data; the directory is
/// the curated record used by the front desk.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Guest {
    /// Unique guest identifier.
    pub id: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Stay preferences (floor, bedding, etc.).
    pub preferences: Option<String>,
    /// When the guest record was created.
    pub created_at: DateTime<Utc>,
    /// When the guest record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Guest {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Data required to create a guest record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Stay preferences.
    pub preferences: Option<String>,
}

/// Fields that may change on a guest record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGuest {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// New preferences.
    pub preferences: Option<String>,
}
