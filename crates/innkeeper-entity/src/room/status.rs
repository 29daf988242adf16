//! Room status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Current status of a room. Exactly one status holds at a time.
///
/// `Reserved` and `Occupied` are driven by the reservation lifecycle; the
/// remaining statuses are set by administrative or housekeeping actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Ready to be booked and occupied.
    Available,
    /// Held for an upcoming reservation.
    Reserved,
    /// A guest is currently in the room.
    Occupied,
    /// Awaiting housekeeping after a check-out.
    Cleaning,
    /// Under maintenance; not bookable.
    Maintenance,
    /// Administratively removed from inventory; not bookable.
    OutOfService,
}

impl RoomStatus {
    /// Whether the room can be offered as a candidate in availability
    /// listings.
    ///
    /// Cleaning rooms are provisionally listable for future dates since
    /// housekeeping returns them to service before any future check-in.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Available | Self::Cleaning)
    }

    /// Whether a new reservation may reference a room in this status.
    ///
    /// Conflicts are date-based, so a currently reserved or occupied room
    /// still takes non-overlapping future stays. Only rooms pulled from
    /// service refuse new reservations outright.
    pub fn accepts_reservations(&self) -> bool {
        !matches!(self, Self::Maintenance | Self::OutOfService)
    }

    /// Whether the status is controlled by the reservation lifecycle rather
    /// than by staff actions.
    pub fn is_lifecycle_managed(&self) -> bool {
        matches!(self, Self::Reserved | Self::Occupied)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Occupied => "occupied",
            Self::Cleaning => "cleaning",
            Self::Maintenance => "maintenance",
            Self::OutOfService => "out_of_service",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = innkeeper_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "occupied" => Ok(Self::Occupied),
            "cleaning" => Ok(Self::Cleaning),
            "maintenance" => Ok(Self::Maintenance),
            "out_of_service" => Ok(Self::OutOfService),
            _ => Err(innkeeper_core::AppError::validation(format!(
                "Invalid room status: '{s}'. Expected one of: available, reserved, occupied, \
                 cleaning, maintenance, out_of_service"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookable_statuses() {
        assert!(RoomStatus::Available.is_bookable());
        assert!(RoomStatus::Cleaning.is_bookable());
        assert!(!RoomStatus::Maintenance.is_bookable());
        assert!(!RoomStatus::OutOfService.is_bookable());
        assert!(!RoomStatus::Occupied.is_bookable());
    }

    #[test]
    fn test_occupied_room_still_accepts_future_reservations() {
        assert!(RoomStatus::Occupied.accepts_reservations());
        assert!(RoomStatus::Reserved.accepts_reservations());
        assert!(RoomStatus::Available.accepts_reservations());
        assert!(RoomStatus::Cleaning.accepts_reservations());
        assert!(!RoomStatus::Maintenance.accepts_reservations());
        assert!(!RoomStatus::OutOfService.accepts_reservations());
    }

    #[test]
    fn test_from_str_round_trip() {
        for status in [
            RoomStatus::Available,
            RoomStatus::Reserved,
            RoomStatus::Occupied,
            RoomStatus::Cleaning,
            RoomStatus::Maintenance,
            RoomStatus::OutOfService,
        ] {
            assert_eq!(status.as_str().parse::<RoomStatus>().unwrap(), status);
        }
        assert!("ocupado".parse::<RoomStatus>().is_err());
    }
}
