//! Concrete repository implementations, one per entity.

pub mod guest;
pub mod reservation;
pub mod room;
pub mod user;
