//! # innkeeper-core
//!
//! Core crate for the Innkeeper hotel back-office service. Contains
//! configuration schemas, shared types (stay ranges, pagination), domain
//! events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Innkeeper crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
