//! Receipt data model.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// Largest amount considered by default (999 999.99), in cents.
pub const DEFAULT_MAX_AMOUNT_CENTS: i64 = 99_999_999;

/// Fields extracted from one receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiptRecord {
    /// Charged amount in cents.
    pub amount_cents: i64,
    /// Ride date, absent when the date could not be extracted.
    pub ride_date: Option<NaiveDate>,
}

impl ReceiptRecord {
    pub fn new(amount_cents: i64, ride_date: Option<NaiveDate>) -> Self {
        Self {
            amount_cents,
            ride_date,
        }
    }

    /// Whether the ride date is missing.
    pub fn is_undated(&self) -> bool {
        self.ride_date.is_none()
    }
}

/// A record together with the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedReceipt {
    pub path: PathBuf,
    pub record: ReceiptRecord,
}

/// A candidate file that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of scanning one directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Successfully extracted receipts, in file name order.
    pub receipts: Vec<ScannedReceipt>,
    /// Files that were skipped, with the reason.
    pub skipped: Vec<SkippedFile>,
    /// Number of files whose name matched the receipt extension.
    pub candidates: usize,
    /// Earliest ride date across all scanned receipts.
    pub earliest: Option<NaiveDate>,
    /// Latest ride date across all scanned receipts.
    pub latest: Option<NaiveDate>,
}

impl ScanReport {
    /// Iterate over the bare records.
    pub fn records(&self) -> impl Iterator<Item = &ReceiptRecord> {
        self.receipts.iter().map(|r| &r.record)
    }

    /// Receipts whose ride date could not be extracted.
    pub fn undated(&self) -> impl Iterator<Item = &ScannedReceipt> {
        self.receipts.iter().filter(|r| r.record.is_undated())
    }

    /// Widen the earliest/latest window with a ride date.
    pub(crate) fn observe_date(&mut self, date: NaiveDate) {
        self.earliest = Some(self.earliest.map_or(date, |d| d.min(date)));
        self.latest = Some(self.latest.map_or(date, |d| d.max(date)));
    }
}

/// Which receipts count towards the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Lowest included amount in cents (inclusive).
    pub min_amount_cents: i64,
    /// Highest included amount in cents (inclusive).
    pub max_amount_cents: i64,
    /// First included ride date (inclusive); `None` is unbounded.
    pub start_date: Option<NaiveDate>,
    /// Last included ride date (inclusive); `None` is unbounded.
    pub end_date: Option<NaiveDate>,
    /// Only include rides from Monday to Friday.
    pub weekdays_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_amount_cents: 0,
            max_amount_cents: DEFAULT_MAX_AMOUNT_CENTS,
            start_date: None,
            end_date: None,
            weekdays_only: false,
        }
    }
}

impl FilterCriteria {
    /// Whether any predicate needs the ride date.
    ///
    /// Undated records never pass while this holds.
    pub fn has_date_constraint(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some() || self.weekdays_only
    }
}

/// Sum and count of the included receipts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    pub total_cents: i64,
    pub matched_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_observe_date_tracks_window() {
        let mut report = ScanReport::default();
        let mid = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let early = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        report.observe_date(mid);
        assert_eq!(report.earliest, Some(mid));
        assert_eq!(report.latest, Some(mid));

        report.observe_date(late);
        report.observe_date(early);
        assert_eq!(report.earliest, Some(early));
        assert_eq!(report.latest, Some(late));
    }

    #[test]
    fn test_default_criteria_has_no_date_constraint() {
        let criteria = FilterCriteria::default();
        assert!(!criteria.has_date_constraint());

        let weekdays = FilterCriteria {
            weekdays_only: true,
            ..FilterCriteria::default()
        };
        assert!(weekdays.has_date_constraint());
    }
}
