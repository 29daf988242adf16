//! Booking policy configuration.

use serde::{Deserialize, Serialize};

/// Policy knobs for reservation creation and check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Minimum stay length in nights.
    #[serde(default = "default_min_stay")]
    pub min_stay_nights: i64,
    /// Maximum stay length in nights.
    #[serde(default = "default_max_stay")]
    pub max_stay_nights: i64,
    /// Whether check-in is restricted to a window around the scheduled date.
    #[serde(default = "default_true")]
    pub enforce_check_in_window: bool,
    /// Width of the check-in window in days on each side of the scheduled
    /// check-in date.
    #[serde(default = "default_window_days")]
    pub check_in_window_days: i64,
    /// Dashboard cache time-to-live in seconds.
    #[serde(default = "default_dashboard_ttl")]
    pub dashboard_cache_ttl_seconds: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            min_stay_nights: default_min_stay(),
            max_stay_nights: default_max_stay(),
            enforce_check_in_window: true,
            check_in_window_days: default_window_days(),
            dashboard_cache_ttl_seconds: default_dashboard_ttl(),
        }
    }
}

fn default_min_stay() -> i64 {
    1
}

fn default_max_stay() -> i64 {
    30
}

fn default_window_days() -> i64 {
    1
}

fn default_true() -> bool {
    true
}

fn default_dashboard_ttl() -> u64 {
    300
}
