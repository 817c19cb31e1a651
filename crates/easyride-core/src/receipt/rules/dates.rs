//! Ride date extraction.

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor for a single language.
pub struct DateExtractor<'a> {
    pattern: &'a Regex,
    format: &'a str,
}

impl<'a> DateExtractor<'a> {
    pub fn new(pattern: &'a Regex, format: &'a str) -> Self {
        Self { pattern, format }
    }
}

impl FieldExtractor for DateExtractor<'_> {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = self.pattern.captures(text)?;
        let full_match = caps.get(0)?;
        let raw = caps.get(1)?.as_str().trim();

        match NaiveDate::parse_from_str(raw, self.format) {
            Ok(date) => Some(ExtractionMatch::new(date, full_match.as_str())),
            Err(e) => {
                debug!("Date {:?} does not match format {}: {}", raw, self.format, e);
                None
            }
        }
    }
}
