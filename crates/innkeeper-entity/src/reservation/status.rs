//! Reservation status enumeration and state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a reservation.
///
/// Transitions only move forward:
///
/// ```text
/// (none) --create--> reserved --check-in--> occupied --check-out--> completed
///     reserved --cancel--> cancelled
///     occupied --cancel--> cancelled
/// ```
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booked, guest not yet arrived.
    Reserved,
    /// Guest has checked in.
    Occupied,
    /// Guest has checked out.
    Completed,
    /// Cancelled before completion.
    Cancelled,
}

impl ReservationStatus {
    /// Active reservations hold their room's dates against new bookings.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Reserved | Self::Occupied)
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Reserved, Self::Occupied)
                | (Self::Occupied, Self::Completed)
                | (Self::Reserved, Self::Cancelled)
                | (Self::Occupied, Self::Cancelled)
        )
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Occupied => "occupied",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = innkeeper_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reserved" => Ok(Self::Reserved),
            // Legacy pre-reservation statuses are synonyms of reserved.
            "confirmed" | "pending" => Ok(Self::Reserved),
            "occupied" => Ok(Self::Occupied),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(innkeeper_core::AppError::validation(format!(
                "Invalid reservation status: '{s}'. Expected one of: reserved, occupied, \
                 completed, cancelled"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_set() {
        assert!(ReservationStatus::Reserved.is_active());
        assert!(ReservationStatus::Occupied.is_active());
        assert!(!ReservationStatus::Completed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }

    #[test]
    fn test_check_in_only_from_reserved() {
        assert!(ReservationStatus::Reserved.can_transition_to(ReservationStatus::Occupied));
        assert!(!ReservationStatus::Occupied.can_transition_to(ReservationStatus::Occupied));
        assert!(!ReservationStatus::Completed.can_transition_to(ReservationStatus::Occupied));
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Occupied));
    }

    #[test]
    fn test_check_out_only_from_occupied() {
        assert!(ReservationStatus::Occupied.can_transition_to(ReservationStatus::Completed));
        assert!(!ReservationStatus::Reserved.can_transition_to(ReservationStatus::Completed));
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Completed));
    }

    #[test]
    fn test_cancel_only_from_active() {
        assert!(ReservationStatus::Reserved.can_transition_to(ReservationStatus::Cancelled));
        assert!(ReservationStatus::Occupied.can_transition_to(ReservationStatus::Cancelled));
        assert!(!ReservationStatus::Completed.can_transition_to(ReservationStatus::Cancelled));
        assert!(!ReservationStatus::Cancelled.can_transition_to(ReservationStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for terminal in [ReservationStatus::Completed, ReservationStatus::Cancelled] {
            for next in [
                ReservationStatus::Reserved,
                ReservationStatus::Occupied,
                ReservationStatus::Completed,
                ReservationStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_legacy_statuses_parse_as_reserved() {
        assert_eq!(
            "confirmed".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Reserved
        );
        assert_eq!(
            "pending".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Reserved
        );
    }
}
