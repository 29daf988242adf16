//! # innkeeper-entity
//!
//! Domain entity models for the Innkeeper hotel back-office: rooms,
//! reservations, guests, and staff users, together with their status and
//! category enumerations.

pub mod guest;
pub mod reservation;
pub mod room;
pub mod user;
