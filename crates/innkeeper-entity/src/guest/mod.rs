//! Guest directory entity.

pub mod model;

pub use model::{CreateGuest, Guest, UpdateGuest};
