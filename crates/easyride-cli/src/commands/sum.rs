//! Sum command - total the receipts in a directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use tracing::{debug, info};

use easyride_core::receipt::rules::{format_cents, to_cents};
use easyride_core::{
    aggregate, EasyrideConfig, FilterCriteria, PatternTable, PdfTextProvider, ReceiptParser,
    ReceiptScanner, Reporter, ScanReport,
};

/// Arguments for summing receipts.
#[derive(Args)]
pub struct SumArgs {
    /// Directory containing the receipt PDFs
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Language of the receipts (default from configuration)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Minimum amount that is considered
    #[arg(long, default_value = "0.00")]
    pub min: Decimal,

    /// Maximum amount that is considered
    #[arg(long, default_value = "999999.99")]
    pub max: Decimal,

    /// First ride date that is considered (YYYY-MM-DD)
    #[arg(long, default_value = "1970-01-01")]
    pub start: NaiveDate,

    /// Last ride date that is considered (YYYY-MM-DD, default today)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Only consider rides from Monday to Friday
    #[arg(long)]
    pub weekdays_only: bool,

    /// Run diagnostics instead of summing
    #[arg(short, long)]
    pub diag: bool,

    /// Write every scanned receipt to a CSV file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl SumArgs {
    /// Turn the command line bounds into filter criteria.
    pub fn criteria(&self) -> anyhow::Result<FilterCriteria> {
        let min_amount_cents = to_cents(self.min).context("--min is out of range")?;
        let max_amount_cents = to_cents(self.max).context("--max is out of range")?;
        if min_amount_cents > max_amount_cents {
            anyhow::bail!("--min {} is larger than --max {}", self.min, self.max);
        }

        let end = self.end.unwrap_or_else(|| Local::now().date_naive());
        if self.start > end {
            anyhow::bail!("--start {} is after --end {}", self.start, end);
        }

        Ok(FilterCriteria {
            min_amount_cents,
            max_amount_cents,
            start_date: Some(self.start),
            end_date: Some(end),
            weekdays_only: self.weekdays_only,
        })
    }

    /// The requested language, falling back to the configured default.
    pub fn language<'a>(&'a self, table: &'a PatternTable) -> anyhow::Result<&'a str> {
        let language = self.language.as_deref().unwrap_or(table.default_language());
        if !table.contains(language) {
            anyhow::bail!(
                "Unsupported language {} (supported: {})",
                language,
                table.languages().collect::<Vec<_>>().join(", ")
            );
        }
        Ok(language)
    }
}

pub fn run(args: &SumArgs, config: &EasyrideConfig) -> anyhow::Result<()> {
    // Everything that can be wrong with the setup fails before scanning
    let table = PatternTable::from_config(&config.languages)
        .context("Invalid language configuration")?;
    let language = args.language(&table)?.to_string();
    let criteria = args.criteria()?;
    debug!("Filter criteria: {:?}", criteria);

    let parser = ReceiptParser::new(table);
    let scanner = ReceiptScanner::new(PdfTextProvider, &parser, &language)?
        .with_config(&config.receipts);

    let report = scanner.scan(&args.path)?;

    info!("Calculating the sum of all amounts...");
    let result = aggregate(report.records(), &criteria)?;

    let reporter = Reporter::new(config.receipts.currency.as_str());
    reporter.log_details(&report, &criteria, &result);

    if let Some(export_path) = &args.export {
        write_export(export_path, &report, &criteria)?;
        info!("Wrote {} receipts to {}", report.receipts.len(), export_path.display());
    }

    let mut stdout = std::io::stdout().lock();
    reporter.write_summary(&mut stdout, &result)?;
    stdout.flush()?;

    Ok(())
}

fn write_export(path: &Path, report: &ScanReport, criteria: &FilterCriteria) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create {}", path.display()))?;

    wtr.write_record(["file", "amount", "ride_date", "included", "reason"])?;

    for receipt in &report.receipts {
        let filename = receipt
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let verdict = criteria.evaluate(&receipt.record);

        wtr.write_record([
            filename,
            &format_cents(receipt.record.amount_cents),
            &receipt.record.ride_date.map(|d| d.to_string()).unwrap_or_default(),
            if verdict.is_ok() { "yes" } else { "no" },
            &verdict.err().map(|e| e.to_string()).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
