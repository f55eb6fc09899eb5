//! # Interfaces
//!
//! Local interfaces as reported by the topology service. This crate only
//! consumes them; ids and grouping are owned by the topology.

use serde::{Deserialize, Serialize};
use shared_types::{IfId, IA};

/// A local interface and the AS at its far end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interface {
    pub id: IfId,
    pub remote_ia: IA,
}

impl Interface {
    pub fn new(id: IfId, remote_ia: IA) -> Self {
        Self { id, remote_ia }
    }
}

/// Interfaces sharing the same (quality, direction) eligibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceGroup {
    pub interfaces: Vec<Interface>,
}

impl InterfaceGroup {
    pub fn new(interfaces: Vec<Interface>) -> Self {
        Self { interfaces }
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn contains(&self, id: IfId) -> bool {
        self.interfaces.iter().any(|i| i.id == id)
    }

    pub fn ids(&self) -> Vec<IfId> {
        self.interfaces.iter().map(|i| i.id).collect()
    }

    /// The interfaces whose far end is `remote`.
    pub fn towards(&self, remote: &IA) -> InterfaceGroup {
        InterfaceGroup::new(
            self.interfaces
                .iter()
                .filter(|i| i.remote_ia == *remote)
                .copied()
                .collect(),
        )
    }
}

impl FromIterator<Interface> for InterfaceGroup {
    fn from_iter<I: IntoIterator<Item = Interface>>(iter: I) -> Self {
        InterfaceGroup::new(iter.into_iter().collect())
    }
}
