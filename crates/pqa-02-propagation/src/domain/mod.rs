//! # Domain Layer
//!
//! Targets, quality policies, interfaces, configuration and errors.

pub mod config;
pub mod errors;
pub mod interface;
pub mod metrics;
pub mod quality;
pub mod target;

pub use config::{PropagationConfig, DEFAULT_N_BEST};
pub use errors::{ConfigError, ExtensionError, PropagationError, SendError};
pub use interface::{Interface, InterfaceGroup};
pub use metrics::{PropagationMetrics, RoundStats};
pub use quality::{FreshnessQuality, HopCountQuality, QualityPolicy, QualityRegistry};
pub use target::Target;
