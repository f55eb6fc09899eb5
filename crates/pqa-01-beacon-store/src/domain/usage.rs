//! # Beacon Usage
//!
//! Bitmask recording what a stored beacon may be used for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Usage bitmask of a stored beacon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Usage(pub u8);

impl Usage {
    /// No usage. As a query filter it matches nothing and is ignored.
    pub const NONE: Usage = Usage(0);
    /// Registered as an up segment.
    pub const UP_REG: Usage = Usage(0x01);
    /// Registered as a down segment.
    pub const DOWN_REG: Usage = Usage(0x02);
    /// Registered as a core segment.
    pub const CORE_REG: Usage = Usage(0x04);
    /// Eligible for propagation.
    pub const PROP: Usage = Usage(0x08);

    /// Whether no bit is set.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `mask` is set in `self`.
    pub fn contains(self, mask: Usage) -> bool {
        self.0 & mask.0 == mask.0
    }
}

impl BitOr for Usage {
    type Output = Usage;

    fn bitor(self, rhs: Usage) -> Usage {
        Usage(self.0 | rhs.0)
    }
}

impl BitOrAssign for Usage {
    fn bitor_assign(&mut self, rhs: Usage) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "none");
        }
        let names = [
            (Usage::UP_REG, "up"),
            (Usage::DOWN_REG, "down"),
            (Usage::CORE_REG, "core"),
            (Usage::PROP, "prop"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", set.join("|"))
    }
}
