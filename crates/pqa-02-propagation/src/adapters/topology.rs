//! Static interface inventory, for deployments with a fixed interface set
//! and for tests.

use crate::domain::{Interface, InterfaceGroup};
use crate::ports::InterfaceTopology;
use shared_types::{Direction, IfId, QualityId};
use std::collections::BTreeMap;

/// Interfaces and groups fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticTopology {
    interfaces: BTreeMap<IfId, Interface>,
    groups: BTreeMap<(QualityId, Direction), Vec<Vec<IfId>>>,
}

impl StaticTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add (or replace) an interface.
    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interfaces.insert(interface.id, interface);
        self
    }

    /// Builder method: add a group for `(quality, direction)`.
    ///
    /// Ids without a registered interface are dropped when the group is read.
    pub fn with_group(mut self, quality: QualityId, direction: Direction, ids: &[IfId]) -> Self {
        self.groups
            .entry((quality, direction))
            .or_default()
            .push(ids.to_vec());
        self
    }
}

impl InterfaceTopology for StaticTopology {
    fn interface_groups(&self, quality: QualityId, direction: Direction) -> Vec<InterfaceGroup> {
        self.groups
            .get(&(quality, direction))
            .map(|groups| {
                groups
                    .iter()
                    .map(|ids| {
                        ids.iter()
                            .filter_map(|id| self.interfaces.get(id).copied())
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn interfaces(&self) -> Vec<Interface> {
        self.interfaces.values().copied().collect()
    }
}
