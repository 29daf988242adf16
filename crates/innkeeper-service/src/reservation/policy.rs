//! Booking policies: check-in window and cancellation fees.
//!
//! Both are pure functions of the clock so the lifecycle manager stays
//! testable without a database.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use innkeeper_core::config::BookingConfig;
use innkeeper_core::error::AppError;

/// Fee fraction charged when cancelling less than 24 hours before check-in.
const FEE_UNDER_24H: f64 = 0.5;
/// Fee fraction charged when cancelling less than 48 hours before check-in.
const FEE_UNDER_48H: f64 = 0.25;

/// Cancellation fee fraction based on hours remaining until check-in.
///
/// Check-in is taken as midnight UTC at the start of the check-in date.
/// A stay that already started (negative hours) falls in the strictest
/// tier.
pub fn cancellation_fee(check_in: NaiveDate, now: DateTime<Utc>) -> f64 {
    let check_in_instant = check_in.and_time(NaiveTime::MIN).and_utc();
    let hours_until = (check_in_instant - now).num_seconds() as f64 / 3600.0;

    if hours_until < 24.0 {
        FEE_UNDER_24H
    } else if hours_until < 48.0 {
        FEE_UNDER_48H
    } else {
        0.0
    }
}

/// The configurable check-in date-window policy.
///
/// When enforced, check-in is only permitted within `window_days` of the
/// scheduled check-in date in either direction.
#[derive(Debug, Clone, Copy)]
pub struct CheckInWindow {
    enforce: bool,
    window_days: i64,
}

impl CheckInWindow {
    /// Build the policy from booking configuration.
    pub fn from_config(config: &BookingConfig) -> Self {
        Self {
            enforce: config.enforce_check_in_window,
            window_days: config.check_in_window_days,
        }
    }

    /// A policy that permits check-in on any date.
    pub fn disabled() -> Self {
        Self {
            enforce: false,
            window_days: 0,
        }
    }

    /// Validate that checking in `today` is allowed for a stay scheduled to
    /// begin on `scheduled`.
    pub fn validate(&self, scheduled: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
        if !self.enforce {
            return Ok(());
        }
        let offset = (today - scheduled).num_days();
        if offset < -self.window_days {
            return Err(AppError::validation(format!(
                "Check-in for {scheduled} is only permitted from {} day(s) before the scheduled date",
                self.window_days
            )));
        }
        if offset > self.window_days {
            return Err(AppError::validation(format!(
                "Check-in window for {scheduled} has passed; contact the front desk"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn instant(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_fee_tiers() {
        let check_in = date("2025-09-10");
        // More than 48 hours out: no fee.
        assert_eq!(cancellation_fee(check_in, instant("2025-09-01T00:00:00Z")), 0.0);
        assert_eq!(cancellation_fee(check_in, instant("2025-09-07T23:00:00Z")), 0.0);
        // Between 24 and 48 hours: 25%.
        assert_eq!(cancellation_fee(check_in, instant("2025-09-08T12:00:00Z")), 0.25);
        // Under 24 hours: 50%.
        assert_eq!(cancellation_fee(check_in, instant("2025-09-09T06:00:00Z")), 0.5);
        // Stay already started: strictest tier.
        assert_eq!(cancellation_fee(check_in, instant("2025-09-11T00:00:00Z")), 0.5);
    }

    #[test]
    fn test_fee_tier_boundaries() {
        let check_in = date("2025-09-10");
        // Exactly 48 hours out is outside the 25% tier.
        assert_eq!(cancellation_fee(check_in, instant("2025-09-08T00:00:00Z")), 0.0);
        // Exactly 24 hours out is outside the 50% tier.
        assert_eq!(cancellation_fee(check_in, instant("2025-09-09T00:00:00Z")), 0.25);
    }

    #[test]
    fn test_window_allows_same_day_and_adjacent_days() {
        let window = CheckInWindow {
            enforce: true,
            window_days: 1,
        };
        let scheduled = date("2025-09-10");
        assert!(window.validate(scheduled, date("2025-09-09")).is_ok());
        assert!(window.validate(scheduled, date("2025-09-10")).is_ok());
        assert!(window.validate(scheduled, date("2025-09-11")).is_ok());
    }

    #[test]
    fn test_window_rejects_outside_days() {
        let window = CheckInWindow {
            enforce: true,
            window_days: 1,
        };
        let scheduled = date("2025-09-10");
        assert!(window.validate(scheduled, date("2025-09-08")).is_err());
        assert!(window.validate(scheduled, date("2025-09-12")).is_err());
    }

    #[test]
    fn test_disabled_window_allows_any_date() {
        let window = CheckInWindow::disabled();
        assert!(window.validate(date("2025-09-10"), date("2026-01-01")).is_ok());
    }
}
