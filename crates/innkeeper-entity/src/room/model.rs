//! Room entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::RoomType;
use super::status::RoomStatus;

/// A hotel room.
///
/// The integer `number` is the business key used by reservations; `id` is
/// the internal storage identifier and never crosses the API boundary as a
/// room reference.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Internal storage identifier.
    pub id: Uuid,
    /// Unique room number (business key).
    pub number: i32,
    /// Room category.
    pub room_type: RoomType,
    /// Nightly price.
    pub price: f64,
    /// Floor the room is on.
    pub floor: i32,
    /// Maximum number of guests.
    pub capacity: i32,
    /// Amenity labels.
    pub amenities: Vec<String>,
    /// Current status.
    pub status: RoomStatus,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Whether the room can appear in availability listings.
    pub fn is_bookable(&self) -> bool {
        self.status.is_bookable()
    }

    /// Whether a new reservation may be placed on this room. Date conflicts
    /// are checked separately.
    pub fn accepts_reservations(&self) -> bool {
        self.status.accepts_reservations()
    }
}

/// Data required to create a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    /// Unique room number.
    pub number: i32,
    /// Room category.
    pub room_type: RoomType,
    /// Nightly price.
    pub price: f64,
    /// Floor the room is on.
    pub floor: i32,
    /// Maximum number of guests.
    pub capacity: i32,
    /// Amenity labels.
    pub amenities: Vec<String>,
}

/// Data for updating a room's static attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoom {
    /// New room category.
    pub room_type: Option<RoomType>,
    /// New nightly price.
    pub price: Option<f64>,
    /// New floor.
    pub floor: Option<i32>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New amenity labels.
    pub amenities: Option<Vec<String>>,
}

/// Optional filters applied to room listings and availability queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFilters {
    /// Restrict to one room category.
    pub room_type: Option<RoomType>,
    /// Restrict to one floor.
    pub floor: Option<i32>,
    /// Minimum nightly price.
    pub min_price: Option<f64>,
    /// Maximum nightly price.
    pub max_price: Option<f64>,
    /// Minimum guest capacity.
    pub min_capacity: Option<i32>,
}
