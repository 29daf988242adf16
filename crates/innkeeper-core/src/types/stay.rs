//! Stay date ranges with half-open interval semantics.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

/// A validated `[check_in, check_out)` calendar date range.
///
/// The interval is half-open: the check-out day itself is not occupied, so
/// back-to-back stays where one guest's check-out equals another's check-in
/// do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    /// First occupied night.
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
}

impl StayRange {
    /// Build a stay range, rejecting empty or inverted intervals.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, AppError> {
        if check_in >= check_out {
            return Err(AppError::validation(format!(
                "Check-in date {check_in} must be strictly before check-out date {check_out}"
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Build a stay range from full timestamps, truncating to calendar dates.
    pub fn from_timestamps(
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        Self::new(check_in.date_naive(), check_out.date_naive())
    }

    /// Number of nights in the stay. Always at least 1 for a valid range.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open interval overlap: `a1 < b2 && a2 > b1`.
    ///
    /// Abutting ranges (one's check-out equal to the other's check-in) do
    /// not overlap.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Whether the stay begins before the given date.
    pub fn starts_before(&self, date: NaiveDate) -> bool {
        self.check_in < date
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn range(check_in: &str, check_out: &str) -> StayRange {
        StayRange::new(date(check_in), date(check_out)).unwrap()
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = StayRange::new(date("2025-09-05"), date("2025-09-01")).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_rejects_zero_night_range() {
        assert!(StayRange::new(date("2025-09-01"), date("2025-09-01")).is_err());
    }

    #[test]
    fn test_nights() {
        assert_eq!(range("2025-09-01", "2025-09-02").nights(), 1);
        assert_eq!(range("2025-09-01", "2025-09-30").nights(), 29);
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = range("2025-08-01", "2025-08-05");
        let b = range("2025-08-03", "2025-08-06");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = range("2025-08-01", "2025-08-10");
        let inner = range("2025-08-03", "2025-08-04");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_back_to_back_does_not_overlap() {
        let first = range("2025-08-01", "2025-08-05");
        let second = range("2025-08-05", "2025-08-07");
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_disjoint_does_not_overlap() {
        let a = range("2025-08-01", "2025-08-03");
        let b = range("2025-08-10", "2025-08-12");
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_identical_ranges_overlap() {
        let a = range("2025-08-01", "2025-08-05");
        assert!(a.overlaps(&a.clone()));
    }

    #[test]
    fn test_from_timestamps_truncates_to_dates() {
        let check_in: DateTime<Utc> = "2025-08-01T15:30:00Z".parse().unwrap();
        let check_out: DateTime<Utc> = "2025-08-03T09:00:00Z".parse().unwrap();
        let range = StayRange::from_timestamps(check_in, check_out).unwrap();
        assert_eq!(range.check_in, date("2025-08-01"));
        assert_eq!(range.check_out, date("2025-08-03"));
        assert_eq!(range.nights(), 2);
    }
}
