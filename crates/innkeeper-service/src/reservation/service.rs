//! Reservation lifecycle service.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use innkeeper_core::config::BookingConfig;
use innkeeper_core::error::AppError;
use innkeeper_core::events::{GuestContact, ReservationEvent};
use innkeeper_core::result::AppResult;
use innkeeper_core::types::pagination::{PageRequest, PageResponse};
use innkeeper_core::types::StayRange;
use innkeeper_database::repositories::reservation::ReservationRepository;
use innkeeper_database::repositories::room::RoomRepository;
use innkeeper_entity::reservation::{
    CreateReservation, Reservation, ReservationFilters, ReservationStatus, UpdateReservation,
};
use innkeeper_entity::room::RoomStatus;
use innkeeper_entity::user::UserRole;

use crate::context::RequestContext;
use crate::reservation::policy::{cancellation_fee, CheckInWindow};

/// Manages the reservation lifecycle: creation, updates, check-in,
/// check-out, and cancellation.
///
/// Status transitions follow the reservation state machine, and room status
/// changes happen in the same transaction as the reservation change. The
/// availability conflict check on the write path runs inside the repository
/// transaction, so a passed pre-check can never admit a double booking.
#[derive(Debug, Clone)]
pub struct ReservationService {
    reservations: Arc<ReservationRepository>,
    rooms: Arc<RoomRepository>,
    booking: BookingConfig,
    events: Option<mpsc::Sender<ReservationEvent>>,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        reservations: Arc<ReservationRepository>,
        rooms: Arc<RoomRepository>,
        booking: BookingConfig,
        events: Option<mpsc::Sender<ReservationEvent>>,
    ) -> Self {
        Self {
            reservations,
            rooms,
            booking,
            events,
        }
    }

    /// Get a reservation by id.
    pub async fn get_reservation(&self, id: Uuid) -> AppResult<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
    }

    /// List reservations matching the filters.
    pub async fn list_reservations(
        &self,
        filters: &ReservationFilters,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.reservations.find_all(filters, page).await
    }

    /// Create a reservation.
    ///
    /// Validates guest details and the stay, then delegates to the
    /// transactional create which re-runs the conflict check under the room
    /// lock. The room's own status is not changed at creation; rooms only
    /// flip when a guest physically arrives or leaves.
    pub async fn create_reservation(
        &self,
        ctx: &RequestContext,
        data: CreateReservation,
    ) -> AppResult<Reservation> {
        ctx.require_at_least(UserRole::Receptionist)?;
        self.validate_guest_details(&data.first_name, &data.last_name, &data.email, data.guests)?;
        self.validate_stay(&data.stay, ctx)?;

        let room = self
            .rooms
            .find_by_number(data.room_number)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {} not found", data.room_number)))?;
        if !room.accepts_reservations() {
            return Err(AppError::room_unavailable(format!(
                "Room {} is {} and cannot take new reservations",
                room.number, room.status
            )));
        }
        if data.guests > room.capacity {
            return Err(AppError::validation(format!(
                "Room {} sleeps at most {} guests",
                room.number, room.capacity
            )));
        }

        let reservation = self.reservations.create_checked(&data).await?;

        info!(
            reservation_id = %reservation.id,
            room = reservation.room_number,
            stay = %data.stay,
            by = %ctx.email,
            "Reservation created"
        );
        self.emit(ReservationEvent::Created {
            reservation_id: reservation.id,
            room_number: reservation.room_number,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            guest: guest_contact(&reservation),
        });

        Ok(reservation)
    }

    /// Update a reservation's guest details, room, or dates.
    ///
    /// Only non-terminal reservations can be edited. Availability is
    /// re-checked only when the room or the dates change, excluding the
    /// reservation itself from the conflict count.
    pub async fn update_reservation(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateReservation,
    ) -> AppResult<Reservation> {
        ctx.require_at_least(UserRole::Receptionist)?;

        let current = self.get_reservation(id).await?;
        if current.status.is_terminal() {
            return Err(AppError::invalid_state(format!(
                "Reservation {id} is {} and can no longer be edited",
                current.status
            )));
        }

        let room_changed = data
            .room_number
            .is_some_and(|n| n != current.room_number);
        let stay_changed = data
            .stay
            .is_some_and(|s| s.check_in != current.check_in || s.check_out != current.check_out);

        let merged = Reservation {
            id: current.id,
            first_name: data.first_name.unwrap_or(current.first_name),
            last_name: data.last_name.unwrap_or(current.last_name),
            email: data.email.unwrap_or(current.email),
            phone: data.phone.or(current.phone),
            room_number: data.room_number.unwrap_or(current.room_number),
            guests: data.guests.unwrap_or(current.guests),
            check_in: data.stay.map_or(current.check_in, |s| s.check_in),
            check_out: data.stay.map_or(current.check_out, |s| s.check_out),
            status: current.status,
            notes: data.notes.or(current.notes),
            cancellation_reason: current.cancellation_reason,
            cancellation_fee: current.cancellation_fee,
            created_at: current.created_at,
            updated_at: current.updated_at,
        };

        self.validate_guest_details(
            &merged.first_name,
            &merged.last_name,
            &merged.email,
            merged.guests,
        )?;
        if stay_changed {
            let stay = merged.stay()?;
            self.validate_stay(&stay, ctx)?;
        }
        if room_changed {
            let room = self
                .rooms
                .find_by_number(merged.room_number)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!("Room {} not found", merged.room_number))
                })?;
            if !room.accepts_reservations() {
                return Err(AppError::room_unavailable(format!(
                    "Room {} is {} and cannot take new reservations",
                    room.number, room.status
                )));
            }
            if merged.guests > room.capacity {
                return Err(AppError::validation(format!(
                    "Room {} sleeps at most {} guests",
                    room.number, room.capacity
                )));
            }
        }

        let updated = self
            .reservations
            .update_checked(&merged, room_changed || stay_changed)
            .await?;

        info!(reservation_id = %id, by = %ctx.email, "Reservation updated");
        Ok(updated)
    }

    /// Check the guest in.
    ///
    /// Permitted only from `reserved`, within the configured window around
    /// the scheduled check-in date. The room moves to `occupied` in the same
    /// transaction.
    pub async fn check_in(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Reservation> {
        ctx.require_at_least(UserRole::Receptionist)?;

        let current = self.get_reservation(id).await?;
        self.ensure_transition(&current, ReservationStatus::Occupied)?;

        let window = CheckInWindow::from_config(&self.booking);
        window.validate(current.check_in, ctx.request_time.date_naive())?;

        let reservation = self
            .reservations
            .transition(
                id,
                ReservationStatus::Reserved,
                ReservationStatus::Occupied,
                Some(RoomStatus::Occupied),
            )
            .await?
            .ok_or_else(concurrent_transition)?;

        info!(
            reservation_id = %id,
            room = reservation.room_number,
            by = %ctx.email,
            "Guest checked in"
        );
        self.emit(ReservationEvent::CheckedIn {
            reservation_id: reservation.id,
            room_number: reservation.room_number,
            guest: guest_contact(&reservation),
        });

        Ok(reservation)
    }

    /// Check the guest out.
    ///
    /// Permitted only from `occupied`. The room moves to `cleaning` in the
    /// same transaction.
    pub async fn check_out(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Reservation> {
        ctx.require_at_least(UserRole::Receptionist)?;

        let current = self.get_reservation(id).await?;
        self.ensure_transition(&current, ReservationStatus::Completed)?;

        let reservation = self
            .reservations
            .transition(
                id,
                ReservationStatus::Occupied,
                ReservationStatus::Completed,
                Some(RoomStatus::Cleaning),
            )
            .await?
            .ok_or_else(concurrent_transition)?;

        info!(
            reservation_id = %id,
            room = reservation.room_number,
            by = %ctx.email,
            "Guest checked out"
        );
        self.emit(ReservationEvent::CheckedOut {
            reservation_id: reservation.id,
            room_number: reservation.room_number,
            guest: guest_contact(&reservation),
        });

        Ok(reservation)
    }

    /// Cancel a reservation, recording the reason and the fee owed.
    ///
    /// Permitted from `reserved` and `occupied`. Cancelling an occupied
    /// reservation releases the room to `cleaning`; cancelling a reserved
    /// one leaves the room untouched.
    pub async fn cancel_reservation(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        reason: Option<String>,
    ) -> AppResult<Reservation> {
        ctx.require_at_least(UserRole::Receptionist)?;

        let current = self.get_reservation(id).await?;
        self.ensure_transition(&current, ReservationStatus::Cancelled)?;

        let fee = cancellation_fee(current.check_in, ctx.request_time);
        let release_room = current.status == ReservationStatus::Occupied;

        let reservation = self
            .reservations
            .cancel(id, current.status, reason.as_deref(), fee, release_room)
            .await?
            .ok_or_else(concurrent_transition)?;

        info!(
            reservation_id = %id,
            room = reservation.room_number,
            fee_fraction = fee,
            by = %ctx.email,
            "Reservation cancelled"
        );
        self.emit(ReservationEvent::Cancelled {
            reservation_id: reservation.id,
            room_number: reservation.room_number,
            reason,
            fee_fraction: fee,
            guest: guest_contact(&reservation),
        });

        Ok(reservation)
    }

    fn ensure_transition(
        &self,
        current: &Reservation,
        next: ReservationStatus,
    ) -> AppResult<()> {
        if current.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(AppError::invalid_state(format!(
                "Reservation {} is {} and cannot move to {next}",
                current.id, current.status
            )))
        }
    }

    fn validate_guest_details(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        guests: i32,
    ) -> AppResult<()> {
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(AppError::validation("Guest first and last name are required"));
        }
        if !is_plausible_email(email) {
            return Err(AppError::validation(format!("Invalid email address: '{email}'")));
        }
        if guests < 1 {
            return Err(AppError::validation("A reservation needs at least one guest"));
        }
        Ok(())
    }

    fn validate_stay(&self, stay: &StayRange, ctx: &RequestContext) -> AppResult<()> {
        let today = ctx.request_time.date_naive();
        if stay.check_in < today {
            return Err(AppError::validation(format!(
                "Check-in date {} is in the past",
                stay.check_in
            )));
        }
        let nights = stay.nights();
        if nights < self.booking.min_stay_nights || nights > self.booking.max_stay_nights {
            return Err(AppError::validation(format!(
                "Stay must be between {} and {} nights, got {nights}",
                self.booking.min_stay_nights, self.booking.max_stay_nights
            )));
        }
        Ok(())
    }

    /// Hand the event to the notification queue. Delivery is best effort;
    /// a full or closed queue never fails the request.
    fn emit(&self, event: ReservationEvent) {
        if let Some(sender) = &self.events {
            if let Err(e) = sender.try_send(event) {
                warn!(error = %e, "Dropping reservation notification");
            }
        }
    }
}

fn guest_contact(reservation: &Reservation) -> GuestContact {
    GuestContact {
        first_name: reservation.first_name.clone(),
        last_name: reservation.last_name.clone(),
        email: reservation.email.clone(),
    }
}

fn concurrent_transition() -> AppError {
    AppError::conflict("Reservation was modified concurrently, please retry")
}

/// Minimal shape check; full validation happens at the API boundary.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_plausible_email("guest@example.com"));
        assert!(is_plausible_email("a.b+c@mail.example.org"));
        assert!(!is_plausible_email("guest"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("guest@localhost"));
        assert!(!is_plausible_email("guest@.com"));
    }
}
