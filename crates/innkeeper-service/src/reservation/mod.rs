//! Reservation lifecycle management.

pub mod policy;
pub mod service;

pub use policy::{cancellation_fee, CheckInWindow};
pub use service::ReservationService;
