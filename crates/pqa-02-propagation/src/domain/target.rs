//! # Propagation Targets
//!
//! A [`Target`] pairs the exact-match identity of a target with the quality
//! policy that ranks beacons for it.

use crate::domain::quality::QualityPolicy;
use shared_types::{Beacon, TargetKey};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A resolved propagation target.
#[derive(Clone)]
pub struct Target {
    pub key: TargetKey,
    pub quality: Arc<dyn QualityPolicy>,
}

impl Target {
    pub fn new(key: TargetKey, quality: Arc<dyn QualityPolicy>) -> Self {
        Self { key, quality }
    }

    pub fn metric(&self, beacon: &Beacon) -> f64 {
        self.quality.metric(beacon)
    }

    pub fn should_consider(&self, beacon: &Beacon) -> bool {
        self.quality.should_consider(&self.key, beacon)
    }

    /// Orders two metrics, better first.
    ///
    /// NaN metrics rank after every number so the order stays total.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        if self.quality.less(a, b) {
            Ordering::Less
        } else if self.quality.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("key", &self.key)
            .field("quality", &self.quality.name())
            .finish()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.quality.name())
    }
}
