use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Game entity identifier. Agents are keyed by it and filters select them.
pub type EntityId = u64;

/// Identity of a zone, held by registered agents as a non-owning back-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneId(pub u32);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone-{}", self.0)
    }
}
