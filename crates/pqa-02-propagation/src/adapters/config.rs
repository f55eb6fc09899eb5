//! # TOML Configuration
//!
//! ```toml
//! [propagation]
//! n_best = 20
//! fail_on_candidate_read_error = false
//! expiry_sweep_interval_secs = 60
//! extension_timeout_ms = 1000
//! ```
//!
//! Missing keys (or a missing section) take their defaults.

use crate::domain::{ConfigError, PropagationConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    propagation: PropagationConfig,
}

/// Loads and validates the engine configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PropagationConfig, ConfigError> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
        path: path.as_ref().display().to_string(),
        error: e.to_string(),
    })?;

    parse_config(&content)
}

/// Parses and validates the engine configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<PropagationConfig, ConfigError> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    file.propagation.validate()?;
    Ok(file.propagation)
}
