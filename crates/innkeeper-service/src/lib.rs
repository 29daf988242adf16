//! # innkeeper-service
//!
//! Business logic service layer for Innkeeper. Each service orchestrates
//! repositories and authentication to implement application-level use
//! cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod availability;
pub mod context;
pub mod guest;
pub mod notification;
pub mod report;
pub mod reservation;
pub mod room;
pub mod user;

pub use availability::AvailabilityEngine;
pub use context::RequestContext;
pub use guest::GuestService;
pub use notification::{LogMailer, Mailer, NotificationDispatcher};
pub use report::ReportService;
pub use reservation::ReservationService;
pub use room::RoomService;
pub use user::UserService;
