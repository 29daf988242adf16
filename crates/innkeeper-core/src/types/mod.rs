//! Shared value types used across the Innkeeper crates.

pub mod pagination;
pub mod stay;

pub use pagination::{PageRequest, PageResponse};
pub use stay::StayRange;
