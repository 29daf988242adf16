//! Occupancy and dashboard reporting.

pub mod service;

pub use service::{DashboardSummary, OccupancyReport, ReportService};
