//! Receipt parser applying the language patterns to page text.

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::receipt::ReceiptRecord;

use super::rules::{
    amounts::{parse_amount, to_cents},
    AmountExtractor, DateExtractor, FieldExtractor, PatternTable,
};
use super::Result;

/// Result of receipt extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ReceiptRecord,
    /// Text matched by the amount pattern.
    pub amount_source: String,
    /// Text matched by the date pattern, if any.
    pub date_source: Option<String>,
    /// Non-fatal extraction problems.
    pub warnings: Vec<String>,
}

/// Extracts receipt records from page text.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    table: PatternTable,
}

impl ReceiptParser {
    /// Create a parser over a validated pattern table.
    pub fn new(table: PatternTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Parse the amount and ride date from page text.
    ///
    /// A missing or non-numeric amount fails the receipt. A missing date
    /// only yields an undated record plus a warning.
    pub fn parse(&self, text: &str, language: &str) -> Result<ExtractionResult> {
        let patterns = self
            .table
            .get(language)
            .ok_or_else(|| ExtractionError::UnknownLanguage(language.to_string()))?;

        let amount = AmountExtractor::new(patterns.amount())
            .extract(text)
            .ok_or_else(|| ExtractionError::FieldNotFound {
                field: "amount",
                language: language.to_string(),
            })?;

        let amount_cents = parse_amount(&amount.value)
            .and_then(to_cents)
            .ok_or_else(|| ExtractionError::Parse {
                field: "amount",
                value: amount.value.clone(),
            })?;

        let mut warnings = Vec::new();
        let date = DateExtractor::new(patterns.date(), patterns.date_format()).extract(text);
        if date.is_none() {
            warnings.push(format!("ride date not found (language {})", language));
        }

        debug!(
            "Extracted {} cents from {:?}, date {:?}",
            amount_cents,
            amount.source,
            date.as_ref().map(|d| d.value)
        );

        Ok(ExtractionResult {
            record: ReceiptRecord::new(amount_cents, date.as_ref().map(|d| d.value)),
            amount_source: amount.source,
            date_source: date.map(|d| d.source),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::rules::patterns::EN_SAMPLE;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn parser() -> ReceiptParser {
        ReceiptParser::new(PatternTable::builtin().unwrap())
    }

    #[test]
    fn test_parse_sample_receipt() {
        let result = parser().parse(EN_SAMPLE, "EN").unwrap();

        assert_eq!(
            result.record,
            ReceiptRecord::new(2550, NaiveDate::from_ymd_opt(2024, 3, 14))
        );
        assert_eq!(result.amount_source, "Total amount chargedCHF 25.50VAT");
        assert_eq!(result.date_source.as_deref(), Some("Travel date 14.03.2024"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_without_date_is_undated() {
        let result = parser()
            .parse("Total amount chargedCHF 10.00VAT", "EN")
            .unwrap();

        assert_eq!(result.record, ReceiptRecord::new(1000, None));
        assert_eq!(result.amount_source, "Total amount chargedCHF 10.00VAT");
        assert_eq!(result.date_source, None);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_parse_without_amount_fails() {
        let err = parser().parse("Travel date 14.03.2024", "EN").unwrap_err();

        assert_eq!(
            err,
            ExtractionError::FieldNotFound {
                field: "amount",
                language: "EN".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_non_numeric_amount() {
        let err = parser()
            .parse("Total amount chargedCHF n/aVAT", "EN")
            .unwrap_err();

        assert_eq!(
            err,
            ExtractionError::Parse {
                field: "amount",
                value: "n/a".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_unknown_language() {
        let err = parser().parse(EN_SAMPLE, "FR").unwrap_err();
        assert_eq!(err, ExtractionError::UnknownLanguage("FR".to_string()));
    }

    #[test]
    fn test_parse_rounds_sub_cent_amounts() {
        let result = parser()
            .parse("Total amount chargedCHF 12.345VAT", "EN")
            .unwrap();
        assert_eq!(result.record.amount_cents, 1235);
    }
}
