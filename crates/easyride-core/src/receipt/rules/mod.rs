//! Rule-based field extractors for EasyRide receipts.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{format_cents, parse_amount, to_cents, AmountExtractor};
pub use dates::DateExtractor;
pub use patterns::{LanguagePatterns, PatternTable};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// A value extracted from receipt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
        }
    }
}
