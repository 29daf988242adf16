//! Read-only conflict detection over date ranges.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use innkeeper_core::error::AppError;
use innkeeper_core::types::StayRange;
use innkeeper_database::repositories::reservation::ReservationRepository;
use innkeeper_database::repositories::room::RoomRepository;
use innkeeper_entity::room::{Room, RoomFilters};

/// Answers, for a room and a date interval, whether an active reservation
/// conflict exists, and, for a date interval and optional filters, which
/// rooms have no conflict.
///
/// Pure query component: it never writes. The authoritative conflict check
/// on the write path re-runs inside the reservation repository's
/// transaction; this engine serves the read-side API and pre-validation.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine {
    /// Reservation repository.
    reservations: Arc<ReservationRepository>,
    /// Room repository.
    rooms: Arc<RoomRepository>,
}

impl AvailabilityEngine {
    /// Creates a new availability engine.
    pub fn new(reservations: Arc<ReservationRepository>, rooms: Arc<RoomRepository>) -> Self {
        Self {
            reservations,
            rooms,
        }
    }

    /// Whether the room has an active reservation overlapping `stay`.
    ///
    /// `exclude_reservation_id` is used when re-checking during an update so
    /// a reservation does not conflict with itself. Fails with a not-found
    /// error if the room does not exist.
    pub async fn has_conflict(
        &self,
        room_number: i32,
        stay: &StayRange,
        exclude_reservation_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        self.rooms
            .find_by_number(room_number)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_number} not found")))?;

        let conflicts = self
            .reservations
            .count_conflicts(room_number, stay, exclude_reservation_id)
            .await?;

        debug!(
            room = room_number,
            stay = %stay,
            conflicts,
            "Availability check"
        );

        Ok(conflicts > 0)
    }

    /// Rooms bookable over `stay` and matching the filters.
    ///
    /// Bulk formulation: fetch candidate rooms whose static status allows
    /// booking, collect the room numbers held by overlapping active
    /// reservations, and subtract. Ordered by type, then price, then room
    /// number. An empty result is not an error.
    pub async fn find_available_rooms(
        &self,
        stay: &StayRange,
        filters: &RoomFilters,
    ) -> Result<Vec<Room>, AppError> {
        let candidates = self.rooms.find_bookable(filters).await?;
        let occupied: HashSet<i32> = self
            .reservations
            .occupied_room_numbers(stay)
            .await?
            .into_iter()
            .collect();

        let available: Vec<Room> = candidates
            .into_iter()
            .filter(|room| !occupied.contains(&room.number))
            .collect();

        debug!(
            stay = %stay,
            available = available.len(),
            "Availability listing"
        );

        Ok(available)
    }
}
