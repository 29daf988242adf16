//! Reporting service: dashboard summary and occupancy queries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use innkeeper_core::error::AppError;
use innkeeper_core::result::AppResult;
use innkeeper_core::types::StayRange;
use innkeeper_database::repositories::guest::GuestRepository;
use innkeeper_database::repositories::reservation::ReservationRepository;
use innkeeper_database::repositories::room::RoomRepository;
use innkeeper_entity::reservation::ReservationStatus;
use innkeeper_entity::room::RoomStatus;

const DASHBOARD_KEY: &str = "dashboard";

/// Rooms broken down by current status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomBreakdown {
    /// Rooms ready to book.
    pub available: i64,
    /// Rooms held for an upcoming stay.
    pub reserved: i64,
    /// Rooms with a guest in them.
    pub occupied: i64,
    /// Rooms awaiting housekeeping.
    pub cleaning: i64,
    /// Rooms under maintenance.
    pub maintenance: i64,
    /// Rooms removed from inventory.
    pub out_of_service: i64,
}

/// Reservations broken down by status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationBreakdown {
    /// Upcoming stays.
    pub reserved: i64,
    /// Stays in progress.
    pub occupied: i64,
    /// Finished stays.
    pub completed: i64,
    /// Cancelled stays.
    pub cancelled: i64,
}

/// Snapshot of the hotel's state for the back-office dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Rooms by status.
    pub rooms: RoomBreakdown,
    /// Rooms counted in inventory (everything except out-of-service).
    pub rooms_in_inventory: i64,
    /// Fraction of in-inventory rooms currently occupied.
    pub occupancy_rate: f64,
    /// Reservations with a check-in in the last 30 days, by status.
    pub reservations_last_30_days: ReservationBreakdown,
    /// Size of the guest directory.
    pub guest_count: i64,
    /// When this snapshot was computed. Snapshots are cached, so this can
    /// lag the request by up to the configured TTL.
    pub generated_at: DateTime<Utc>,
}

/// Occupancy over one date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyReport {
    /// First night of the range.
    pub from: chrono::NaiveDate,
    /// Exclusive end of the range.
    pub to: chrono::NaiveDate,
    /// Rooms with at least one active reservation overlapping the range.
    pub rooms_booked: i64,
    /// Rooms counted in inventory.
    pub rooms_in_inventory: i64,
    /// `rooms_booked / rooms_in_inventory`, 0 when the inventory is empty.
    pub occupancy_rate: f64,
}

/// Computes dashboard and occupancy figures from the repositories.
///
/// The dashboard snapshot is cached with a short TTL; reads tolerate the
/// staleness, and the reservation write path never consults this cache, so
/// no invalidation hook is needed.
#[derive(Debug, Clone)]
pub struct ReportService {
    rooms: Arc<RoomRepository>,
    reservations: Arc<ReservationRepository>,
    guests: Arc<GuestRepository>,
    dashboard_cache: Cache<&'static str, Arc<DashboardSummary>>,
}

impl ReportService {
    /// Creates a new report service with the given dashboard cache TTL.
    pub fn new(
        rooms: Arc<RoomRepository>,
        reservations: Arc<ReservationRepository>,
        guests: Arc<GuestRepository>,
        dashboard_ttl: Duration,
    ) -> Self {
        let dashboard_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(dashboard_ttl)
            .build();
        Self {
            rooms,
            reservations,
            guests,
            dashboard_cache,
        }
    }

    /// The dashboard snapshot, computed at most once per TTL.
    pub async fn dashboard(&self) -> AppResult<Arc<DashboardSummary>> {
        self.dashboard_cache
            .try_get_with(DASHBOARD_KEY, self.compute_dashboard())
            .await
            .map_err(|e: Arc<AppError>| {
                AppError::internal(format!("Dashboard computation failed: {e}"))
            })
    }

    /// Occupancy over a date range, computed fresh on every call.
    pub async fn occupancy(&self, stay: &StayRange) -> AppResult<OccupancyReport> {
        let booked = self.reservations.occupied_room_numbers(stay).await?.len() as i64;
        let inventory = self.rooms.count_in_inventory().await?;

        Ok(OccupancyReport {
            from: stay.check_in,
            to: stay.check_out,
            rooms_booked: booked,
            rooms_in_inventory: inventory,
            occupancy_rate: rate(booked, inventory),
        })
    }

    async fn compute_dashboard(&self) -> AppResult<Arc<DashboardSummary>> {
        debug!("Computing dashboard snapshot");

        let room_counts: HashMap<RoomStatus, i64> =
            self.rooms.status_counts().await?.into_iter().collect();
        let rooms = RoomBreakdown {
            available: count(&room_counts, RoomStatus::Available),
            reserved: count(&room_counts, RoomStatus::Reserved),
            occupied: count(&room_counts, RoomStatus::Occupied),
            cleaning: count(&room_counts, RoomStatus::Cleaning),
            maintenance: count(&room_counts, RoomStatus::Maintenance),
            out_of_service: count(&room_counts, RoomStatus::OutOfService),
        };

        let rooms_in_inventory = self.rooms.count_in_inventory().await?;
        let occupancy_rate = rate(rooms.occupied, rooms_in_inventory);

        let cutoff = Utc::now() - chrono::Duration::days(30);
        let reservation_counts: HashMap<ReservationStatus, i64> = self
            .reservations
            .status_counts_since(cutoff)
            .await?
            .into_iter()
            .collect();
        let reservations_last_30_days = ReservationBreakdown {
            reserved: *reservation_counts
                .get(&ReservationStatus::Reserved)
                .unwrap_or(&0),
            occupied: *reservation_counts
                .get(&ReservationStatus::Occupied)
                .unwrap_or(&0),
            completed: *reservation_counts
                .get(&ReservationStatus::Completed)
                .unwrap_or(&0),
            cancelled: *reservation_counts
                .get(&ReservationStatus::Cancelled)
                .unwrap_or(&0),
        };

        let guest_count = self.guests.count().await?;

        Ok(Arc::new(DashboardSummary {
            rooms,
            rooms_in_inventory,
            occupancy_rate,
            reservations_last_30_days,
            guest_count,
            generated_at: Utc::now(),
        }))
    }
}

fn count(counts: &HashMap<RoomStatus, i64>, status: RoomStatus) -> i64 {
    *counts.get(&status).unwrap_or(&0)
}

fn rate(part: i64, whole: i64) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_handles_empty_inventory() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(5, 10), 0.5);
    }
}
