//! CLI commands.

pub mod config;
pub mod diag;
pub mod sum;

use std::path::{Path, PathBuf};

use tracing::debug;

use easyride_core::EasyrideConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("easyride")
        .join("config.json")
}

/// Load the configuration from `path`, else the default file if present,
/// else the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EasyrideConfig> {
    if let Some(path) = path {
        debug!("Loading configuration from {}", path.display());
        return Ok(EasyrideConfig::from_file(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(EasyrideConfig::from_file(&default_path)?)
    } else {
        Ok(EasyrideConfig::default())
    }
}
