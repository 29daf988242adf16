//! Availability queries over rooms and reservations.

pub mod engine;

pub use engine::AvailabilityEngine;
