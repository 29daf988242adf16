//! # innkeeper-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all Innkeeper entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
