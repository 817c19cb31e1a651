//! Data models for receipt processing.

pub mod config;
pub mod receipt;

pub use config::{EasyrideConfig, LanguageConfig, LanguagePatternConfig, LanguageSample, ReceiptConfig};
pub use receipt::{AggregateResult, FilterCriteria, ReceiptRecord, ScanReport, ScannedReceipt, SkippedFile};
