//! Filtering and summing of receipt records.

use chrono::{Datelike, Weekday};
use std::fmt;
use tracing::debug;

use crate::error::RideError;
use crate::models::receipt::{AggregateResult, FilterCriteria, ReceiptRecord};
use crate::receipt::rules::format_cents;

/// Why a record does not count towards the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    BelowMinimum,
    AboveMaximum,
    Undated,
    BeforeStart,
    AfterEnd,
    Weekend(Weekday),
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::BelowMinimum => write!(f, "below minimum amount"),
            Exclusion::AboveMaximum => write!(f, "above maximum amount"),
            Exclusion::Undated => write!(f, "ride date unknown"),
            Exclusion::BeforeStart => write!(f, "before start date"),
            Exclusion::AfterEnd => write!(f, "after end date"),
            Exclusion::Weekend(day) => write!(f, "ride on a {}", day),
        }
    }
}

impl FilterCriteria {
    /// Check a record against every predicate.
    ///
    /// Amount bounds are inclusive. While a date constraint is active an
    /// undated record is always excluded.
    pub fn evaluate(&self, record: &ReceiptRecord) -> Result<(), Exclusion> {
        if record.amount_cents < self.min_amount_cents {
            return Err(Exclusion::BelowMinimum);
        }
        if record.amount_cents > self.max_amount_cents {
            return Err(Exclusion::AboveMaximum);
        }

        if !self.has_date_constraint() {
            return Ok(());
        }

        let date = record.ride_date.ok_or(Exclusion::Undated)?;
        if self.start_date.is_some_and(|start| date < start) {
            return Err(Exclusion::BeforeStart);
        }
        if self.end_date.is_some_and(|end| date > end) {
            return Err(Exclusion::AfterEnd);
        }
        if self.weekdays_only && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Err(Exclusion::Weekend(date.weekday()));
        }

        Ok(())
    }

    pub fn matches(&self, record: &ReceiptRecord) -> bool {
        self.evaluate(record).is_ok()
    }
}

/// Sum the amounts of the records passing `criteria`.
///
/// Fails with [`RideError::TotalOverflow`] when the total leaves the `i64`
/// cent range.
pub fn aggregate<'a, I>(records: I, criteria: &FilterCriteria) -> crate::Result<AggregateResult>
where
    I: IntoIterator<Item = &'a ReceiptRecord>,
{
    let mut result = AggregateResult::default();

    for record in records {
        match criteria.evaluate(record) {
            Ok(()) => {
                debug!("Adding amount {}", format_cents(record.amount_cents));
                result.matched_count += 1;
                result.total_cents = result
                    .total_cents
                    .checked_add(record.amount_cents)
                    .ok_or(RideError::TotalOverflow {
                        count: result.matched_count,
                        max: i64::MAX,
                    })?;
            }
            Err(reason) => {
                debug!("Ignoring amount {}: {}", format_cents(record.amount_cents), reason);
            }
        }
    }

    Ok(result)
}
