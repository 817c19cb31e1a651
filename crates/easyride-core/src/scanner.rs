//! Directory scanning: one receipt record per matching file.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, RideError};
use crate::models::config::ReceiptConfig;
use crate::models::receipt::{ScanReport, ScannedReceipt, SkippedFile};
use crate::pdf::TextProvider;
use crate::receipt::{ExtractionResult, ReceiptParser};
use crate::receipt::rules::format_cents;
use crate::Result;

/// Scans a directory of receipts with a text provider and a parser.
pub struct ReceiptScanner<'a, P> {
    provider: P,
    parser: &'a ReceiptParser,
    language: String,
    extension: String,
    page: usize,
}

impl<'a, P: TextProvider> ReceiptScanner<'a, P> {
    /// Create a scanner for receipts in `language`.
    pub fn new(
        provider: P,
        parser: &'a ReceiptParser,
        language: &str,
    ) -> std::result::Result<Self, ExtractionError> {
        if !parser.table().contains(language) {
            return Err(ExtractionError::UnknownLanguage(language.to_string()));
        }

        let defaults = ReceiptConfig::default();
        Ok(Self {
            provider,
            parser,
            language: language.to_string(),
            extension: defaults.extension,
            page: defaults.page,
        })
    }

    /// Apply the file suffix and page index from configuration.
    pub fn with_config(self, config: &ReceiptConfig) -> Self {
        self.with_extension(&config.extension).with_page(config.page)
    }

    /// Set the receipt file suffix (matched case-sensitively).
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    /// Set the page index holding the receipt fields.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Scan every matching file directly inside `dir`.
    ///
    /// Only an unreadable directory is an error; a file that cannot be read
    /// or parsed is logged and listed in [`ScanReport::skipped`].
    pub fn scan(&self, dir: &Path) -> Result<ScanReport> {
        info!("Searching for files in path {}...", dir.display());
        let candidates = self.candidates(dir)?;
        info!("Processing {} files.", candidates.len());

        let mut report = ScanReport {
            candidates: candidates.len(),
            ..ScanReport::default()
        };

        for path in candidates {
            match self.scan_file(&path) {
                Ok(result) => {
                    for warning in &result.warnings {
                        warn!("{}: {}", path.display(), warning);
                    }
                    debug!(
                        "{}: amount matched {:?}, date matched {:?}",
                        path.display(),
                        result.amount_source,
                        result.date_source
                    );

                    let record = result.record;
                    if let Some(date) = record.ride_date {
                        report.observe_date(date);
                    }

                    info!(
                        "File {} contains amount {} dated {}",
                        path.display(),
                        format_cents(record.amount_cents),
                        record
                            .ride_date
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "unknown".to_string())
                    );
                    report.receipts.push(ScannedReceipt { path, record });
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if let (Some(earliest), Some(latest)) = (report.earliest, report.latest) {
            info!("Ride dates range from {} to {}", earliest, latest);
        }
        info!(
            "Scanned {} receipts, skipped {} files",
            report.receipts.len(),
            report.skipped.len()
        );

        Ok(report)
    }

    fn scan_file(&self, path: &Path) -> Result<ExtractionResult> {
        let text = self.provider.page_text(path, self.page)?;
        Ok(self.parser.parse(&text, &self.language)?)
    }

    /// Regular files directly in `dir` ending in the receipt suffix, sorted.
    fn candidates(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let directory_error = |source| RideError::Directory {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(directory_error)? {
            let entry = entry.map_err(directory_error)?;
            let path = entry.path();

            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                debug!("Ignoring non UTF-8 file name {}", path.display());
                continue;
            };
            if !name.ends_with(&self.extension) || !path.is_file() {
                continue;
            }

            debug!("Found file of type {}: {}", self.extension, name);
            files.push(path);
        }

        files.sort();
        Ok(files)
    }
}
