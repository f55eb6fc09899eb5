//! # Propagation Metrics

/// Counters kept by the propagation engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationMetrics {
    /// Batches built successfully.
    pub batches_built: u64,
    /// Beacons extended (before post-extension filtering).
    pub beacons_extended: u64,
    /// Candidate fetches that failed and were treated as empty.
    pub candidate_read_failures: u64,
    /// Extension calls that failed or timed out.
    pub extension_failures: u64,
    /// Extensions towards an egress interface with id 0.
    pub zero_egress_anomalies: u64,
    /// Batches handed to the sender.
    pub batches_sent: u64,
    /// Batches the sender rejected.
    pub send_failures: u64,
}

/// Outcome of one propagation round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundStats {
    /// Targets visited.
    pub targets: usize,
    /// Batches the sender accepted.
    pub batches_sent: usize,
    /// Beacons in accepted batches.
    pub beacons_sent: usize,
    /// Batches that failed to build or send.
    pub batches_failed: usize,
}
