//! HTTP request handlers.

pub mod auth;
pub mod guest;
pub mod health;
pub mod report;
pub mod reservation;
pub mod room;
pub mod user;
