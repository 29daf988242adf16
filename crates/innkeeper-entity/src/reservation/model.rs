//! Reservation entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use innkeeper_core::types::StayRange;

use super::status::ReservationStatus;

/// A reservation for one room over a date range.
///
/// `room_number` references the room's business key, not its storage id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// System-generated identifier.
    pub id: Uuid,
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email address.
    pub email: String,
    /// Guest phone number.
    pub phone: Option<String>,
    /// Booked room number.
    pub room_number: i32,
    /// Number of guests in the party.
    pub guests: i32,
    /// Scheduled check-in date (inclusive).
    pub check_in: NaiveDate,
    /// Scheduled check-out date (exclusive).
    pub check_out: NaiveDate,
    /// Current status.
    pub status: ReservationStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Reason recorded when cancelled.
    pub cancellation_reason: Option<String>,
    /// Fee fraction recorded when cancelled (0.0, 0.25, or 0.5).
    pub cancellation_fee: Option<f64>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// The stay interval of this reservation.
    ///
    /// Stored rows always satisfy `check_in < check_out`; the constructor
    /// error can therefore only arise from corrupted data.
    pub fn stay(&self) -> Result<StayRange, innkeeper_core::AppError> {
        StayRange::new(self.check_in, self.check_out)
    }

    /// Full display name of the guest.
    pub fn guest_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// Data required to create a new reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservation {
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email address.
    pub email: String,
    /// Guest phone number.
    pub phone: Option<String>,
    /// Room number to book.
    pub room_number: i32,
    /// Number of guests in the party.
    pub guests: i32,
    /// Requested stay interval.
    pub stay: StayRange,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Fields that may change on an existing reservation.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReservation {
    /// New guest first name.
    pub first_name: Option<String>,
    /// New guest last name.
    pub last_name: Option<String>,
    /// New guest email.
    pub email: Option<String>,
    /// New guest phone.
    pub phone: Option<String>,
    /// Move to a different room.
    pub room_number: Option<i32>,
    /// New party size.
    pub guests: Option<i32>,
    /// New stay interval (both dates together).
    pub stay: Option<StayRange>,
    /// New notes.
    pub notes: Option<String>,
}

/// Optional filters applied to reservation listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilters {
    /// Restrict to one status.
    pub status: Option<ReservationStatus>,
    /// Restrict to one room.
    pub room_number: Option<i32>,
    /// Earliest check-in date.
    pub from: Option<NaiveDate>,
    /// Latest check-in date.
    pub to: Option<NaiveDate>,
}
