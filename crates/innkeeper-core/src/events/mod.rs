//! Domain events emitted by Innkeeper operations.
//!
//! Events are handed off to the notification dispatcher after the owning
//! transaction commits. Emission is fire-and-forget: a full queue or a
//! failed send never fails the operation that produced the event.

pub mod reservation;

pub use reservation::{GuestContact, ReservationEvent};
