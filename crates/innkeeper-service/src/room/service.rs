//! Room inventory service.

use std::sync::Arc;

use tracing::info;

use innkeeper_core::error::AppError;
use innkeeper_core::result::AppResult;
use innkeeper_core::types::pagination::{PageRequest, PageResponse};
use innkeeper_database::repositories::reservation::ReservationRepository;
use innkeeper_database::repositories::room::RoomRepository;
use innkeeper_entity::room::{CreateRoom, Room, RoomFilters, RoomStatus, UpdateRoom};
use innkeeper_entity::user::UserRole;

use crate::context::RequestContext;

/// Manages the room inventory: CRUD on rooms and manual status changes by
/// housekeeping and management.
///
/// The `reserved` and `occupied` room statuses belong to the reservation
/// lifecycle and cannot be set or cleared here.
#[derive(Debug, Clone)]
pub struct RoomService {
    rooms: Arc<RoomRepository>,
    reservations: Arc<ReservationRepository>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(rooms: Arc<RoomRepository>, reservations: Arc<ReservationRepository>) -> Self {
        Self {
            rooms,
            reservations,
        }
    }

    /// Get a room by number.
    pub async fn get_room(&self, number: i32) -> AppResult<Room> {
        self.rooms
            .find_by_number(number)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {number} not found")))
    }

    /// List rooms matching the filters.
    pub async fn list_rooms(
        &self,
        filters: &RoomFilters,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Room>> {
        self.rooms.find_all(filters, page).await
    }

    /// Add a room to the inventory. New rooms start `available`.
    pub async fn create_room(&self, ctx: &RequestContext, data: CreateRoom) -> AppResult<Room> {
        ctx.require_at_least(UserRole::Manager)?;
        validate_room_attributes(data.number, data.price, data.floor, data.capacity)?;

        let room = self.rooms.create(&data).await?;
        info!(room = room.number, by = %ctx.email, "Room created");
        Ok(room)
    }

    /// Update a room's static attributes (type, price, floor, capacity,
    /// amenities). Status changes go through [`Self::set_room_status`].
    pub async fn update_room(
        &self,
        ctx: &RequestContext,
        number: i32,
        data: UpdateRoom,
    ) -> AppResult<Room> {
        ctx.require_at_least(UserRole::Manager)?;

        if let Some(price) = data.price {
            if price <= 0.0 {
                return Err(AppError::validation("Nightly price must be positive"));
            }
        }
        if let Some(capacity) = data.capacity {
            if capacity < 1 {
                return Err(AppError::validation("Capacity must be at least 1"));
            }
        }

        let room = self.rooms.update(number, &data).await?;
        info!(room = number, by = %ctx.email, "Room updated");
        Ok(room)
    }

    /// Manually set a room's status.
    ///
    /// Housekeeping and up may move rooms between the staff-managed statuses
    /// (`available`, `cleaning`, `maintenance`, `out_of_service`). Rooms
    /// currently held by the lifecycle (`reserved`, `occupied`) are off
    /// limits, as are the lifecycle statuses themselves.
    pub async fn set_room_status(
        &self,
        ctx: &RequestContext,
        number: i32,
        status: RoomStatus,
    ) -> AppResult<Room> {
        ctx.require_at_least(UserRole::Housekeeping)?;

        if status.is_lifecycle_managed() {
            return Err(AppError::invalid_state(format!(
                "Status {status} is set by check-in and check-out, not manually"
            )));
        }
        let current = self.get_room(number).await?;
        if current.status.is_lifecycle_managed() {
            return Err(AppError::invalid_state(format!(
                "Room {number} is {} and is controlled by its reservation",
                current.status
            )));
        }

        let room = self.rooms.update_status(number, status).await?;
        info!(room = number, status = %status, by = %ctx.email, "Room status changed");
        Ok(room)
    }

    /// Remove a room from the inventory.
    ///
    /// Refused while the room has active reservations; cancel or complete
    /// them first.
    pub async fn delete_room(&self, ctx: &RequestContext, number: i32) -> AppResult<()> {
        ctx.require_at_least(UserRole::Manager)?;

        let active = self.reservations.find_active_for_room(number).await?;
        if !active.is_empty() {
            return Err(AppError::conflict(format!(
                "Room {number} has {} active reservation(s)",
                active.len()
            )));
        }

        self.rooms.delete(number).await?;
        info!(room = number, by = %ctx.email, "Room deleted");
        Ok(())
    }
}

fn validate_room_attributes(number: i32, price: f64, floor: i32, capacity: i32) -> AppResult<()> {
    if number < 1 {
        return Err(AppError::validation("Room number must be positive"));
    }
    if price <= 0.0 {
        return Err(AppError::validation("Nightly price must be positive"));
    }
    if floor < 0 {
        return Err(AppError::validation("Floor cannot be negative"));
    }
    if capacity < 1 {
        return Err(AppError::validation("Capacity must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_attribute_validation() {
        assert!(validate_room_attributes(101, 120.0, 1, 2).is_ok());
        assert!(validate_room_attributes(0, 120.0, 1, 2).is_err());
        assert!(validate_room_attributes(101, 0.0, 1, 2).is_err());
        assert!(validate_room_attributes(101, 120.0, -1, 2).is_err());
        assert!(validate_room_attributes(101, 120.0, 1, 0).is_err());
    }
}
