//! Amount extraction and cents conversion.

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::{ExtractionMatch, FieldExtractor};

/// Amount field extractor.
///
/// Yields the raw text captured by the language's amount pattern; turning it
/// into cents is a separate step so a non-numeric capture can be told apart
/// from a missing one.
pub struct AmountExtractor<'a> {
    pattern: &'a Regex,
}

impl<'a> AmountExtractor<'a> {
    pub fn new(pattern: &'a Regex) -> Self {
        Self { pattern }
    }
}

impl FieldExtractor for AmountExtractor<'_> {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = self.pattern.captures(text)?;
        let full_match = caps.get(0)?;
        let value = caps.get(1)?.as_str().trim().to_string();

        Some(ExtractionMatch::new(value, full_match.as_str()))
    }
}

/// Parse an amount as printed on a receipt (e.g. "25.50" or "1'035.49").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'' && *c != '\u{2019}')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Convert a decimal amount to integer cents.
///
/// Sub-cent digits are rounded half away from zero, so 12.345 becomes 1235
/// and 12.344 becomes 1234. Returns `None` if the result overflows `i64`.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Format cents with two decimals (e.g. 103549 → "1035.49").
pub fn format_cents(cents: i64) -> String {
    format!("{:.2}", Decimal::new(cents, 2))
}
