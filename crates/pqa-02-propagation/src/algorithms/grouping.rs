//! # Interface Grouping

use crate::domain::InterfaceGroup;
use crate::ports::InterfaceTopology;
use shared_types::{TargetKey, IA};
use std::collections::BTreeSet;

/// Interface groups eligible for `target`'s quality and direction.
pub fn interface_groups<T: InterfaceTopology + ?Sized>(
    topology: &T,
    target: &TargetKey,
) -> Vec<InterfaceGroup> {
    topology.interface_groups(target.quality, target.direction)
}

/// Each eligible group restricted to interfaces facing `to`.
///
/// One entry per group, in group order; entries may be empty.
pub fn interface_subgroups<T: InterfaceTopology + ?Sized>(
    topology: &T,
    target: &TargetKey,
    to: &IA,
) -> Vec<InterfaceGroup> {
    interface_groups(topology, target)
        .iter()
        .map(|group| group.towards(to))
        .collect()
}

/// Distinct remote ASes over all interfaces, in IA order.
pub fn neighbouring_ases<T: InterfaceTopology + ?Sized>(topology: &T) -> Vec<IA> {
    topology
        .interfaces()
        .into_iter()
        .map(|i| i.remote_ia)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
