//! Configuration structures for receipt scanning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::receipt::rules::patterns::{EN_AMOUNT, EN_DATE, EN_DATE_FORMAT, EN_SAMPLE};

/// Main configuration for the easyride pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EasyrideConfig {
    /// Receipt file configuration.
    pub receipts: ReceiptConfig,

    /// Language pattern configuration.
    pub languages: LanguageConfig,
}

/// Receipt file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// File name suffix of receipt documents (matched case-sensitively).
    pub extension: String,

    /// Page index (0-based) holding the amount and the ride date.
    pub page: usize,

    /// Currency printed in the summary.
    pub currency: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            extension: ".pdf".to_string(),
            page: 0,
            currency: "CHF".to_string(),
        }
    }
}

/// Supported receipt languages and their extraction patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Language used when none is requested.
    pub default: String,

    /// Declared supported language codes.
    pub supported: Vec<String>,

    /// Patterns per language code.
    pub patterns: BTreeMap<String, LanguagePatternConfig>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        let mut patterns = BTreeMap::new();
        patterns.insert(
            "EN".to_string(),
            LanguagePatternConfig {
                amount: Some(EN_AMOUNT.to_string()),
                date: Some(EN_DATE.to_string()),
                date_format: Some(EN_DATE_FORMAT.to_string()),
                sample: Some(LanguageSample {
                    text: EN_SAMPLE.to_string(),
                    amount_cents: 2550,
                    ride_date: NaiveDate::from_ymd_opt(2024, 3, 14),
                }),
            },
        );

        Self {
            default: "EN".to_string(),
            supported: vec!["EN".to_string()],
            patterns,
        }
    }
}

/// Raw (uncompiled) patterns for one language.
///
/// Every field is optional here so that an incomplete file still
/// deserializes and the pattern table can report exactly what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguagePatternConfig {
    /// Regex whose first capture group is the charged amount.
    pub amount: Option<String>,

    /// Regex whose first capture group is the ride date.
    pub date: Option<String>,

    /// chrono format of the captured date, e.g. `%d.%m.%Y`.
    pub date_format: Option<String>,

    /// Known receipt text the diagnostics run these patterns against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<LanguageSample>,
}

/// Receipt page text together with the values it must yield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSample {
    pub text: String,
    pub amount_cents: i64,
    #[serde(default)]
    pub ride_date: Option<NaiveDate>,
}

impl EasyrideConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
