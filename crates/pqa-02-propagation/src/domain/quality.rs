//! # Quality Policies
//!
//! A quality policy ranks beacons for a target and decides which beacons a
//! target considers at all. Policies are plugged in per [`QualityId`]
//! through the [`QualityRegistry`]; the engine never inspects a metric
//! beyond calling [`QualityPolicy::less`].

use pqa_01_beacon_store::{SystemTimeSource, TimeSource};
use shared_types::{Beacon, QualityId, TargetKey};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Ranking and eligibility policy of one quality.
pub trait QualityPolicy: Send + Sync {
    /// Whether metric `a` is strictly better than metric `b`.
    fn less(&self, a: f64, b: f64) -> bool;

    /// Ranking value of `beacon`. NaN ranks behind every other value.
    fn metric(&self, beacon: &Beacon) -> f64;

    /// Whether `target` should consider `beacon` at all.
    fn should_consider(&self, target: &TargetKey, beacon: &Beacon) -> bool;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Fewer AS hops is better. Beacons longer than `max_hops` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopCountQuality {
    pub max_hops: usize,
}

impl Default for HopCountQuality {
    fn default() -> Self {
        Self { max_hops: 16 }
    }
}

impl QualityPolicy for HopCountQuality {
    fn less(&self, a: f64, b: f64) -> bool {
        a < b
    }

    fn metric(&self, beacon: &Beacon) -> f64 {
        beacon.segment.hops() as f64
    }

    fn should_consider(&self, _target: &TargetKey, beacon: &Beacon) -> bool {
        beacon.segment.hops() <= self.max_hops
    }

    fn name(&self) -> &'static str {
        "hop-count"
    }
}

/// Newer origination is better. Beacons older than `max_age_secs` are
/// ignored.
pub struct FreshnessQuality {
    pub max_age_secs: u64,
    clock: Arc<dyn TimeSource>,
}

impl FreshnessQuality {
    pub fn new(max_age_secs: u64, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            max_age_secs,
            clock,
        }
    }
}

impl fmt::Debug for FreshnessQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreshnessQuality")
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}

impl QualityPolicy for FreshnessQuality {
    fn less(&self, a: f64, b: f64) -> bool {
        a > b
    }

    fn metric(&self, beacon: &Beacon) -> f64 {
        beacon.segment.info.timestamp as f64
    }

    fn should_consider(&self, _target: &TargetKey, beacon: &Beacon) -> bool {
        let age = self
            .clock
            .now()
            .saturating_sub(beacon.segment.info.timestamp);
        age <= self.max_age_secs
    }

    fn name(&self) -> &'static str {
        "freshness"
    }
}

/// Quality id to policy.
#[derive(Clone, Default)]
pub struct QualityRegistry {
    policies: BTreeMap<QualityId, Arc<dyn QualityPolicy>>,
}

impl QualityRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hop count and freshness (one hour) on the system clock.
    pub fn with_builtin() -> Self {
        Self::new()
            .with(QualityId::HOP_COUNT, Arc::new(HopCountQuality::default()))
            .with(
                QualityId::FRESHNESS,
                Arc::new(FreshnessQuality::new(3600, Arc::new(SystemTimeSource))),
            )
    }

    /// Builder method: register (or replace) the policy for `id`.
    pub fn with(mut self, id: QualityId, policy: Arc<dyn QualityPolicy>) -> Self {
        self.register(id, policy);
        self
    }

    pub fn register(&mut self, id: QualityId, policy: Arc<dyn QualityPolicy>) {
        self.policies.insert(id, policy);
    }

    pub fn resolve(&self, id: QualityId) -> Option<Arc<dyn QualityPolicy>> {
        self.policies.get(&id).cloned()
    }
}

impl fmt::Debug for QualityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.policies.iter().map(|(id, p)| (id, p.name())))
            .finish()
    }
}
