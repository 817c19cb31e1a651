//! Error types for the easyride-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the easyride library.
#[derive(Error, Debug)]
pub enum RideError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Receipt field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scanning a receipt directory failed.
    #[error("cannot read directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The matched amounts do not fit into the total.
    #[error("total of {count} receipts exceeds {max} cents")]
    TotalOverflow { count: usize, max: i64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The file could not be read from disk.
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page index requested.
    #[error("invalid page index: {0}")]
    InvalidPage(usize),
}

/// Errors related to receipt field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The pattern for a field did not match the receipt text.
    #[error("{field} not found (language {language})")]
    FieldNotFound {
        field: &'static str,
        language: String,
    },

    /// The pattern matched but the captured text is not a valid value.
    #[error("failed to parse {field}: {value:?}")]
    Parse { field: &'static str, value: String },

    /// No patterns are registered for the requested language.
    #[error("unsupported language: {0}")]
    UnknownLanguage(String),
}

/// Errors in the language pattern configuration.
///
/// All of these are fatal and reported before any receipt is scanned.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No supported language is declared.
    #[error("no supported languages declared")]
    NoLanguages,

    /// A declared language has no pattern entry at all.
    #[error("language {0} is declared as supported but has no patterns")]
    MissingLanguage(String),

    /// A declared language lacks one of its required patterns.
    #[error("language {language} is missing its {field} pattern")]
    MissingPattern {
        language: String,
        field: &'static str,
    },

    /// A pattern failed to compile.
    #[error("language {language}: invalid {field} pattern: {reason}")]
    InvalidPattern {
        language: String,
        field: &'static str,
        reason: String,
    },

    /// A pattern has no capture group for the value.
    #[error("language {language}: {field} pattern has no capture group")]
    MissingCaptureGroup {
        language: String,
        field: &'static str,
    },

    /// The default language is not among the declared languages.
    #[error("default language {0} is not declared as supported")]
    UnknownDefault(String),

    /// The configuration file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the expected layout.
    #[error("malformed config file {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// Result type for the easyride library.
pub type Result<T> = std::result::Result<T, RideError>;
