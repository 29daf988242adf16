//! Reservation lifecycle events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Guest contact details carried on every reservation event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestContact {
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email address.
    pub email: String,
}

impl GuestContact {
    /// Full display name of the guest.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Events emitted by the reservation lifecycle manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReservationEvent {
    /// A reservation was created.
    Created {
        /// Reservation ID.
        reservation_id: Uuid,
        /// Booked room number.
        room_number: i32,
        /// Scheduled check-in date.
        check_in: NaiveDate,
        /// Scheduled check-out date.
        check_out: NaiveDate,
        /// Guest contact details.
        guest: GuestContact,
    },
    /// A guest checked in.
    CheckedIn {
        /// Reservation ID.
        reservation_id: Uuid,
        /// Occupied room number.
        room_number: i32,
        /// Guest contact details.
        guest: GuestContact,
    },
    /// A guest checked out.
    CheckedOut {
        /// Reservation ID.
        reservation_id: Uuid,
        /// Vacated room number.
        room_number: i32,
        /// Guest contact details.
        guest: GuestContact,
    },
    /// A reservation was cancelled.
    Cancelled {
        /// Reservation ID.
        reservation_id: Uuid,
        /// Room number the reservation held.
        room_number: i32,
        /// Stated cancellation reason, if any.
        reason: Option<String>,
        /// Cancellation fee fraction recorded for billing (0.0, 0.25, 0.5).
        fee_fraction: f64,
        /// Guest contact details.
        guest: GuestContact,
    },
}

impl ReservationEvent {
    /// The reservation this event concerns.
    pub fn reservation_id(&self) -> Uuid {
        match self {
            Self::Created { reservation_id, .. }
            | Self::CheckedIn { reservation_id, .. }
            | Self::CheckedOut { reservation_id, .. }
            | Self::Cancelled { reservation_id, .. } => *reservation_id,
        }
    }

    /// The guest contact the notification should be addressed to.
    pub fn guest(&self) -> &GuestContact {
        match self {
            Self::Created { guest, .. }
            | Self::CheckedIn { guest, .. }
            | Self::CheckedOut { guest, .. }
            | Self::Cancelled { guest, .. } => guest,
        }
    }

}
