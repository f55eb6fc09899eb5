//! # Propagation Configuration

use crate::domain::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default best-set size.
pub const DEFAULT_N_BEST: usize = 20;

/// Configuration for the propagation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Upper bound on beacons per candidate set and per batch.
    pub n_best: usize,
    /// Fail batch construction on candidate read errors instead of
    /// treating the group as empty.
    pub fail_on_candidate_read_error: bool,
    /// Period of the store's expiry sweep.
    pub expiry_sweep_interval_secs: u64,
    /// Budget for one extension call.
    pub extension_timeout_ms: u64,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            n_best: DEFAULT_N_BEST,
            fail_on_candidate_read_error: false,
            expiry_sweep_interval_secs: 60,
            extension_timeout_ms: 1_000,
        }
    }
}

impl PropagationConfig {
    /// Builder method: set N.
    pub fn with_n_best(mut self, n_best: usize) -> Self {
        self.n_best = n_best;
        self
    }

    /// Builder method: fail hard on candidate read errors.
    pub fn with_fail_on_candidate_read_error(mut self, fail: bool) -> Self {
        self.fail_on_candidate_read_error = fail;
        self
    }

    /// Builder method: set the extension budget.
    pub fn with_extension_timeout(mut self, timeout: Duration) -> Self {
        self.extension_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn extension_timeout(&self) -> Duration {
        Duration::from_millis(self.extension_timeout_ms)
    }

    pub fn expiry_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.expiry_sweep_interval_secs)
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_best == 0 {
            return Err(ConfigError::Invalid("n_best must be positive".to_string()));
        }
        if self.expiry_sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "expiry_sweep_interval_secs must be positive".to_string(),
            ));
        }
        if self.extension_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "extension_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
