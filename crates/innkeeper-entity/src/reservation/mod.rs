//! Reservation entity.

pub mod model;
pub mod status;

pub use model::{CreateReservation, Reservation, ReservationFilters, UpdateReservation};
pub use status::ReservationStatus;
