// src/config.rs
// Loads flat override mappings (key: value) from YAML files for VolParams.

use log::info;
use std::fs;
use std::path::Path;

use crate::params::ParamMap;

/// Reads an override mapping from a YAML file.
///
/// The file must be a single flat mapping, e.g.
/// ```yaml
/// fr: 400
/// max_shifts: [5, 5]
/// method: atm
/// ```
pub fn load_overrides<P: AsRef<Path>>(path: P) -> Result<ParamMap, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    if contents.trim().is_empty() {
        return Ok(ParamMap::new());
    }

    // A document holding only `~` means no overrides
    let overrides: Option<ParamMap> =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    let overrides = overrides.unwrap_or_default();
    info!("Loaded {} parameter overrides from {}", overrides.len(), path.display());
    Ok(overrides)
}

/// Override file error types
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(String),
    /// File is not a flat YAML mapping
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Override file error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Override parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
