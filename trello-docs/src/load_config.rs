//! `load_config` module: reads a generator config file (YAML or JSON) and merges it into a
//! [`GeneratorConfig`] ready for validation.
//!
//! This module is the only place where user-supplied config files are parsed.
//!
//! # Responsibilities
//! - Parse the file into typed [`ConfigFile`] (camelCase keys, every field optional)
//! - Resolve the preset: the `--preset` flag wins over the file's `preset` key
//! - Merge in order: defaults, then preset, then the fields set in the file
//!
//! Credentials never live in the config file; they come from the environment.
//!
//! # Errors
//! All errors use `anyhow::Error` and are surfaced at the CLI boundary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use trello_docs_core::config::{apply_preset, ConfigOverrides, GeneratorConfig};

/// On-disk shape of a generator config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Optional preset name (`simple`, `detailed`, `printReady`, `onePerPage`).
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(flatten)]
    pub overrides: ConfigOverrides,
}

/// Reads and parses a config file. YAML is a superset of JSON, so both are accepted.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(ConfigFile::default());
    }

    match serde_yaml::from_str::<ConfigFile>(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, preset = ?conf.preset, "Parsed config successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config file");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

/// Defaults, then the preset (`preset_flag` over the file's key), then the file's fields.
pub fn build_config(file: &ConfigFile, preset_flag: Option<&str>) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::default();
    if let Some(name) = preset_flag.or(file.preset.as_deref()) {
        config = apply_preset(config, name).with_context(|| format!("Cannot apply preset '{name}'"))?;
    }
    Ok(config.merge(&file.overrides))
}
