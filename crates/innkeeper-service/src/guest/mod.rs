//! Guest directory management.

pub mod service;

pub use service::GuestService;
