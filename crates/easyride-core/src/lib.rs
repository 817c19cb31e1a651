//! Core library for EasyRide receipt processing.
//!
//! This crate provides:
//! - PDF text extraction per page
//! - Per-language amount and ride date extraction
//! - Directory scanning with per-file failure tolerance
//! - Amount, date and weekday filtering with integer-cent totals

pub mod error;
pub mod filter;
pub mod models;
pub mod pdf;
pub mod receipt;
pub mod report;
pub mod scanner;

pub use error::{ConfigError, ExtractionError, PdfError, RideError, Result};
pub use filter::{aggregate, Exclusion};
pub use models::config::EasyrideConfig;
pub use models::receipt::{AggregateResult, FilterCriteria, ReceiptRecord, ScanReport};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextProvider, TextProvider};
pub use receipt::rules::PatternTable;
pub use receipt::{ExtractionResult, ReceiptParser};
pub use report::Reporter;
pub use scanner::ReceiptScanner;
