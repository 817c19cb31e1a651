//! Diagnostic mode - smoke checks instead of a full scan.

use std::path::Path;

use console::style;
use tracing::debug;

use easyride_core::models::config::LanguageSample;
use easyride_core::{EasyrideConfig, PatternTable, ReceiptParser};

use super::sum::SumArgs;

/// Outcome of one diagnostic check.
struct Check {
    name: String,
    outcome: Result<String, String>,
}

impl Check {
    fn print(&self) {
        match &self.outcome {
            Ok(detail) => println!("{} {}: {}", style("✓").green(), self.name, detail),
            Err(reason) => println!("{} {}: {}", style("✗").red(), self.name, reason),
        }
    }
}

pub fn run(args: &SumArgs, config: &EasyrideConfig) -> anyhow::Result<()> {
    let checks = run_checks(args, config);
    for check in &checks {
        check.print();
    }

    let failed = checks.iter().filter(|c| c.outcome.is_err()).count();
    if failed > 0 {
        anyhow::bail!("{} of {} diagnostic checks failed", failed, checks.len());
    }
    Ok(())
}

fn run_checks(args: &SumArgs, config: &EasyrideConfig) -> Vec<Check> {
    let mut checks = Vec::new();

    let table = match PatternTable::from_config(&config.languages) {
        Ok(table) => {
            checks.push(Check {
                name: "language patterns".to_string(),
                outcome: Ok(format!(
                    "{} (default {})",
                    table.languages().collect::<Vec<_>>().join(", "),
                    table.default_language()
                )),
            });
            table
        }
        Err(e) => {
            checks.push(Check {
                name: "language patterns".to_string(),
                outcome: Err(e.to_string()),
            });
            return checks;
        }
    };

    let language = args
        .language
        .clone()
        .unwrap_or_else(|| table.default_language().to_string());
    checks.push(Check {
        name: "requested language".to_string(),
        outcome: if table.contains(&language) {
            Ok(language.clone())
        } else {
            Err(format!("{} is not supported", language))
        },
    });

    let parser = ReceiptParser::new(table);
    for code in parser.table().languages() {
        let sample = config
            .languages
            .patterns
            .get(code)
            .and_then(|raw| raw.sample.as_ref());
        checks.push(Check {
            name: format!("sample receipt ({})", code),
            outcome: match sample {
                Some(sample) => check_sample(&parser, code, sample),
                None => Ok("no sample configured".to_string()),
            },
        });
    }

    checks.push(Check {
        name: "receipt directory".to_string(),
        outcome: check_directory(&args.path, &config.receipts.extension),
    });

    checks
}

fn check_sample(
    parser: &ReceiptParser,
    language: &str,
    sample: &LanguageSample,
) -> Result<String, String> {
    let result = parser
        .parse(&sample.text, language)
        .map_err(|e| e.to_string())?;
    debug!("Sample receipt ({}) parsed as {:?}", language, result.record);

    if result.record.amount_cents != sample.amount_cents {
        return Err(format!(
            "expected {} cents, got {}",
            sample.amount_cents, result.record.amount_cents
        ));
    }
    if result.record.ride_date != sample.ride_date {
        return Err(format!(
            "expected ride date {:?}, got {:?}",
            sample.ride_date, result.record.ride_date
        ));
    }
    Ok("amount and ride date extracted".to_string())
}

/// Count the regular files in `path` the scanner would pick up.
fn check_directory(path: &Path, extension: &str) -> Result<String, String> {
    let entries = std::fs::read_dir(path).map_err(|e| format!("{}: {}", path.display(), e))?;

    let count = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(extension))
                && entry.path().is_file()
        })
        .count();

    Ok(format!("{} contains {} {} files", path.display(), count, extension))
}
