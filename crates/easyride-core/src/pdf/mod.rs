//! PDF text provider module.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextProvider};

use crate::error::PdfError;
use std::path::Path;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> usize;

    /// Extract text from a specific page (0-based).
    fn extract_page_text(&self, page: usize) -> Result<String>;
}

/// Source of raw page text for receipt files.
pub trait TextProvider {
    /// Return the text of page `page` (0-based) of the document at `path`.
    fn page_text(&self, path: &Path, page: usize) -> Result<String>;
}
