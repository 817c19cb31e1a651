//! Summary formatting.

use std::io::Write;
use tracing::{info, warn};

use crate::models::receipt::{AggregateResult, FilterCriteria, ScanReport};
use crate::receipt::rules::format_cents;

/// Formats the run summary.
#[derive(Debug, Clone)]
pub struct Reporter {
    currency: String,
}

impl Reporter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// The one-line summary, e.g. `Total sum: CHF 35.50 (2 entries)`.
    ///
    /// The wording never changes with the count so scripts can parse it.
    pub fn summary_line(&self, result: &AggregateResult) -> String {
        format!(
            "Total sum: {} {} ({} entries)",
            self.currency,
            format_cents(result.total_cents),
            result.matched_count
        )
    }

    /// Write the summary line to `out`.
    pub fn write_summary<W: Write>(&self, out: &mut W, result: &AggregateResult) -> std::io::Result<()> {
        writeln!(out, "{}", self.summary_line(result))
    }

    /// Log what the summary line does not show.
    pub fn log_details(&self, report: &ScanReport, criteria: &FilterCriteria, result: &AggregateResult) {
        if criteria.has_date_constraint() {
            for receipt in report.undated() {
                warn!(
                    "{} has no ride date and is excluded from the total",
                    receipt.path.display()
                );
            }
        }

        match (report.earliest, report.latest) {
            (Some(earliest), Some(latest)) => {
                info!("Earliest ride {}, latest ride {}", earliest, latest)
            }
            _ => info!("No dated rides found"),
        }

        info!(
            "{} of {} receipts matched, {} files skipped",
            result.matched_count,
            report.receipts.len(),
            report.skipped.len()
        );
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new("CHF")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_line() {
        let reporter = Reporter::default();

        let result = AggregateResult { total_cents: 3550, matched_count: 2 };
        assert_eq!(reporter.summary_line(&result), "Total sum: CHF 35.50 (2 entries)");

        let result = AggregateResult { total_cents: 440, matched_count: 1 };
        assert_eq!(reporter.summary_line(&result), "Total sum: CHF 4.40 (1 entries)");
    }

    #[test]
    fn test_summary_line_empty() {
        let reporter = Reporter::new("EUR");
        assert_eq!(
            reporter.summary_line(&AggregateResult::default()),
            "Total sum: EUR 0.00 (0 entries)"
        );
    }

    #[test]
    fn test_write_summary() {
        let mut out = Vec::new();
        let result = AggregateResult { total_cents: 100_003_549, matched_count: 3 };
        Reporter::default().write_summary(&mut out, &result).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Total sum: CHF 1000035.49 (3 entries)\n");
    }
}
