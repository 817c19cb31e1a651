//! Per-language regex patterns for EasyRide receipts.

use chrono::format::{Item, StrftimeItems};
use regex::Regex;
use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::models::config::{LanguageConfig, LanguagePatternConfig};

// English receipts: "Total amount chargedCHF 25.50VAT ..."
pub const EN_AMOUNT: &str = r"Total amount charged\s*CHF\s*(.+?)\s*VAT";

// English receipts: "Travel date 14.03.2024"
pub const EN_DATE: &str = r"Travel date\s*:?\s*(\d{1,2}\.\d{1,2}\.\d{4})";

pub const EN_DATE_FORMAT: &str = "%d.%m.%Y";

/// Page text of a well-formed English receipt, used by the diagnostics.
pub const EN_SAMPLE: &str = "EasyRide purchase receipt\nTravel date 14.03.2024\n\
    Total amount chargedCHF 25.50VAT 8.1% included\n";

/// Compiled patterns for one language.
#[derive(Debug, Clone)]
pub struct LanguagePatterns {
    amount: Regex,
    date: Regex,
    date_format: String,
}

impl LanguagePatterns {
    pub fn amount(&self) -> &Regex {
        &self.amount
    }

    pub fn date(&self) -> &Regex {
        &self.date
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    fn compile(code: &str, raw: &LanguagePatternConfig) -> Result<Self, ConfigError> {
        let amount = compile_pattern(code, "amount", raw.amount.as_deref())?;
        let date = compile_pattern(code, "date", raw.date.as_deref())?;

        let date_format = match raw.date_format.as_deref().map(str::trim) {
            Some(f) if !f.is_empty() => f.to_string(),
            _ => {
                return Err(ConfigError::MissingPattern {
                    language: code.to_string(),
                    field: "date format",
                });
            }
        };
        if StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidPattern {
                language: code.to_string(),
                field: "date format",
                reason: format!("unsupported specifier in {:?}", date_format),
            });
        }

        Ok(Self {
            amount,
            date,
            date_format,
        })
    }
}

fn compile_pattern(
    language: &str,
    field: &'static str,
    pattern: Option<&str>,
) -> Result<Regex, ConfigError> {
    let pattern = match pattern {
        Some(p) if !p.trim().is_empty() => p,
        _ => {
            return Err(ConfigError::MissingPattern {
                language: language.to_string(),
                field,
            });
        }
    };

    let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        language: language.to_string(),
        field,
        reason: e.to_string(),
    })?;

    // Group 0 is the whole match; the value needs group 1.
    if regex.captures_len() < 2 {
        return Err(ConfigError::MissingCaptureGroup {
            language: language.to_string(),
            field,
        });
    }

    Ok(regex)
}

/// Immutable language → patterns table, validated on construction.
#[derive(Debug, Clone)]
pub struct PatternTable {
    default: String,
    languages: BTreeMap<String, LanguagePatterns>,
}

impl PatternTable {
    /// Build the table, checking every declared language is complete.
    pub fn from_config(config: &LanguageConfig) -> Result<Self, ConfigError> {
        if config.supported.is_empty() {
            return Err(ConfigError::NoLanguages);
        }

        let mut languages = BTreeMap::new();
        for code in &config.supported {
            let raw = config
                .patterns
                .get(code)
                .ok_or_else(|| ConfigError::MissingLanguage(code.clone()))?;
            languages.insert(code.clone(), LanguagePatterns::compile(code, raw)?);
        }

        if !languages.contains_key(&config.default) {
            return Err(ConfigError::UnknownDefault(config.default.clone()));
        }

        Ok(Self {
            default: config.default.clone(),
            languages,
        })
    }

    /// The table for the built-in English receipts.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_config(&LanguageConfig::default())
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }

    pub fn get(&self, code: &str) -> Option<&LanguagePatterns> {
        self.languages.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Supported language codes in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}
